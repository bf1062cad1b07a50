#[cfg(test)]
mod tests {
    use crate::core::error::RelposError;
    use crate::parsing::label_parser::LabelParser;

    #[test]
    fn test_parse_without_monitor_marker() {
        let info = LabelParser::parse("G002_objt_171028T23595999.fit").unwrap();
        assert_eq!(info.camera_id, "002");
        assert_eq!(info.calendar_date, 171028);
        assert_eq!(info.clock.hour, 23);
        assert_eq!(info.clock.minute, 59);
        assert_eq!(info.clock.centis, 5999);
    }

    #[test]
    fn test_parse_strips_directory_and_extension() {
        let info = LabelParser::parse("/data/raw/G045_mon_flat_180101T00000001.FITS").unwrap();
        assert_eq!(info.camera_id, "045");
        assert_eq!(info.calendar_date, 180101);
        assert_eq!(info.clock.centis, 1);
        assert_eq!(info.clock.seconds_of_day().value(), 0.01);
    }

    #[test]
    fn test_parse_without_prefix_or_type() {
        let info = LabelParser::parse("005_171028T12000000").unwrap();
        assert_eq!(info.camera_id, "005");
        assert_eq!(info.clock.seconds_of_day().value(), 43200.0);
    }

    #[test]
    fn test_reject_invalid_calendar_date() {
        let err = LabelParser::parse("G005_objt_171332T12000000.fit").unwrap_err();
        assert!(matches!(err, RelposError::MalformedLabel { .. }));

        // Not a leap year.
        assert!(LabelParser::parse("G005_objt_170229T12000000.fit").is_err());
        assert!(LabelParser::parse("G005_objt_200229T12000000.fit").is_ok());
    }

    #[test]
    fn test_reject_out_of_range_time() {
        assert!(LabelParser::parse("G005_objt_171028T24000000.fit").is_err());
        assert!(LabelParser::parse("G005_objt_171028T12600000.fit").is_err());
        assert!(LabelParser::parse("G005_objt_171028T12006000.fit").is_err());
    }

    #[test]
    fn test_reject_structural_problems() {
        assert!(LabelParser::parse("G005.fit").is_err());
        assert!(LabelParser::parse("G_objt_171028T12000000.fit").is_err());
        assert!(LabelParser::parse("G005_objt_17102812000000.fit").is_err());
        assert!(LabelParser::parse("G005_objt_171028T120000.fit").is_err());
        assert!(LabelParser::parse("G005_objt_1710x8T12000000.fit").is_err());
    }

    #[test]
    fn test_reject_multibyte_label_without_panic() {
        for label in ["a日日", "日", "G005_objt_171028T1200000日.fit", "G005_日_171028T12000000.fi日"] {
            let err = LabelParser::parse(label).unwrap_err();
            assert!(matches!(err, RelposError::MalformedLabel { .. }), "{label}");
        }
    }

    #[test]
    fn test_parse_non_ascii_type_field() {
        let info = LabelParser::parse("G005_日_171028T12000000.fit").unwrap();
        assert_eq!(info.camera_id, "005");
        assert_eq!(info.clock.seconds_of_day().value(), 43200.0);
    }

    #[test]
    fn test_error_names_label() {
        let err = LabelParser::parse("G005_objt_171028T99999999.fit").unwrap_err();
        assert!(err.to_string().contains("G005_objt_171028T99999999.fit"));
    }
}
