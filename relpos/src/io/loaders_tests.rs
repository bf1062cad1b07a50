#[cfg(test)]
mod tests {
    use crate::core::context::RunContext;
    use crate::core::domain::CameraRole;
    use crate::core::error::RelposError;
    use crate::io::loaders::ObservationLoader;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Helper to create a temp pointing log
    fn create_temp_log(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const FFOV_LOG: &str = "\
10.0000 20.0000 G005_mon_objt_171028T12000000.fit
10.0100 20.0100 G005_mon_objt_171028T12001000.fit
10.0200 20.0200 G005_mon_objt_171028T12002000.fit
";

    #[test]
    fn test_load_file() {
        let file = create_temp_log(FFOV_LOG);
        let loaded = ObservationLoader::load_file(file.path()).unwrap();

        assert_eq!(loaded.set.camera_id, "005");
        assert_eq!(loaded.num_points(), 3);
        assert_eq!(loaded.skipped_lines, 0);
        assert_eq!(loaded.path, file.path());

        let second = &loaded.set.observations[1];
        assert_eq!(second.boresight.ra().value(), 10.01);
        assert_eq!(second.calendar_date, 171028);
        assert_eq!(second.time_of_day.value(), 43210.0);
        assert_eq!(second.source_label, "G005_mon_objt_171028T12001000.fit");
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        match ObservationLoader::load_file(&missing) {
            Err(RelposError::SourceUnreadable { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_empty_file_is_unreadable() {
        let file = create_temp_log("\n   \n");
        let err = ObservationLoader::load_file(file.path()).unwrap_err();
        assert!(matches!(err, RelposError::SourceUnreadable { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_only_malformed_lines_is_unreadable() {
        let log = "10.0 20.0\nabc 20.0 G005_objt_171028T12000000.fit\n";
        let err = ObservationLoader::load_from_str(log, Path::new("bad.txt")).unwrap_err();
        assert!(matches!(err, RelposError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_malformed_lines_are_skipped_and_counted() {
        let log = "\
10.0 20.0 G001_objt_171028T12000000.fit

10.0 20.0
10.0 20.0 G001_objt_171399T12000000.fit
10.0 20.0 G001_objt_171028T25000000.fit
10.1 20.1 G001_objt_171028T12000100.fit
";
        let loaded = ObservationLoader::load_from_str(log, Path::new("jfov.txt")).unwrap();
        assert_eq!(loaded.num_points(), 2);
        assert_eq!(loaded.skipped_lines, 3);
    }

    #[test]
    fn test_multibyte_label_is_skipped_and_counted() {
        let log = "10 20 G005_objt_171028T12000000.fit\n10 20 a日日\n10 20 G005_objt_171028T12000100.fi日\n";
        let loaded = ObservationLoader::load_from_str(log, Path::new("ffov.txt")).unwrap();
        assert_eq!(loaded.num_points(), 1);
        assert_eq!(loaded.skipped_lines, 2);
        assert_eq!(loaded.set.camera_id, "005");
    }

    #[test]
    fn test_crlf_and_tabs() {
        let log = "10.0\t20.0\tG001_objt_171028T12000000.fit\r\n10.0 20.0 G001_objt_171028T12000100.fit\r\n";
        let loaded = ObservationLoader::load_from_str(log, Path::new("jfov.txt")).unwrap();
        assert_eq!(loaded.num_points(), 2);
        assert_eq!(loaded.set.observations[0].source_label, "G001_objt_171028T12000000.fit");
    }

    #[test]
    fn test_camera_mismatch_is_kept() {
        let log = "\
10.0 20.0 G001_objt_171028T12000000.fit
10.0 20.0 G002_objt_171028T12000100.fit
";
        let loaded = ObservationLoader::load_from_str(log, Path::new("mixed.txt")).unwrap();
        assert_eq!(loaded.set.camera_id, "001");
        assert_eq!(loaded.num_points(), 2);
    }

    #[test]
    fn test_load_into_assigns_roles() {
        let ffov = create_temp_log(FFOV_LOG);
        let jfov = create_temp_log("10.0 21.0 G001_objt_171028T12000100.fit\n");
        let mut ctx = RunContext::new();

        assert_eq!(
            ObservationLoader::load_into(jfov.path(), &mut ctx).unwrap(),
            CameraRole::Follower
        );
        assert_eq!(
            ObservationLoader::load_into(ffov.path(), &mut ctx).unwrap(),
            CameraRole::Reference
        );

        let (reference, follower) = ctx.sets().unwrap();
        assert_eq!(reference.camera_id, "005");
        assert_eq!(follower.camera_id, "001");
    }

    #[test]
    fn test_load_into_rejects_second_reference() {
        let first = create_temp_log(FFOV_LOG);
        let second = create_temp_log("10.0 20.0 G010_objt_171028T12000000.fit\n");
        let mut ctx = RunContext::new();

        ObservationLoader::load_into(first.path(), &mut ctx).unwrap();
        let err = ObservationLoader::load_into(second.path(), &mut ctx).unwrap_err();
        assert!(matches!(
            err,
            RelposError::RoleConflict {
                role: CameraRole::Reference,
                ..
            }
        ));
    }
}
