use std::fs::read_dir;
use test_utils::constants::TEST_FILES_DIRECTORY;
use test_utils::{load_test_index, run_test_for_file};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_scenarios_from_files() {
        let index = load_test_index();

        let mut file_paths: Vec<_> = read_dir(TEST_FILES_DIRECTORY.as_path())
            .expect("Failed to read test files directory")
            .map(|entry| entry.expect("Failed to read file").path())
            .filter(|path| path.is_file())
            .collect();
        file_paths.sort();

        assert!(!file_paths.is_empty(), "No scenario files found");

        for file_path in file_paths {
            eprintln!("Testing file: {}", file_path.display());

            let (actual, expected) =
                run_test_for_file(&file_path, &index).expect("Failed to run scenario");

            assert_eq!(
                actual,
                expected,
                "{} - Expected: {:?}, but got: {:?}",
                file_path.display(),
                expected,
                actual
            );
        }
    }
}
