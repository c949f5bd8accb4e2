//! Integration tests for fetch-cache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the host's config file and environment
    fn fetch_cache(workspace: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("fetch-cache");
        cmd.env_remove("FETCH_CACHE_DIR")
            .env_remove("FETCH_CACHE_MAX_SIZE")
            .env_remove("FETCH_CACHE_CONFIG")
            .arg("--config")
            .arg(workspace.path().join("config.toml"))
            .arg("--cache-dir")
            .arg(workspace.path().join("root"));
        cmd
    }

    fn write_file(path: &Path, size: usize, mode: u32) {
        fs::write(path, vec![b'x'; size]).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
        }
        #[cfg(not(unix))]
        let _ = mode;
    }

    /// 1500 bytes across three files, one nested
    fn source_tree(workspace: &TempDir) -> std::path::PathBuf {
        let src = workspace.path().join("src");
        fs::create_dir_all(src.join("folder1")).unwrap();
        write_file(&src.join("file1.txt"), 500, 0o555);
        write_file(&src.join("file2.txt"), 500, 0o400);
        write_file(&src.join("folder1").join("file3.txt"), 500, 0o555);
        src
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("fetch-cache")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Local artifact cache"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("fetch-cache")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("fetch-cache"));
    }

    #[test]
    fn has_misses_on_empty_cache() {
        let ws = TempDir::new().unwrap();
        fetch_cache(&ws)
            .args(["has", "git", "not-present"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn save_has_restore_roundtrip() {
        let ws = TempDir::new().unwrap();
        let src = source_tree(&ws);
        let out = ws.path().join("out");

        fetch_cache(&ws)
            .args(["--max-size", "10Mi", "save", "git", "sha256:abc"])
            .arg(&src)
            .assert()
            .success()
            .stdout(predicate::str::contains("Cached git/sha256:abc"));

        fetch_cache(&ws)
            .args(["has", "git", "sha256:abc"])
            .assert()
            .success()
            .stdout(predicate::str::contains("c2hhMjU2OmFiYw=="));

        fetch_cache(&ws)
            .args(["restore", "git", "sha256:abc"])
            .arg(&out)
            .assert()
            .success();

        for rel in ["file1.txt", "file2.txt", "folder1/file3.txt"] {
            assert_eq!(fs::read(src.join(rel)).unwrap(), fs::read(out.join(rel)).unwrap());
            assert_eq!(
                fs::metadata(src.join(rel)).unwrap().permissions(),
                fs::metadata(out.join(rel)).unwrap().permissions()
            );
        }
    }

    #[test]
    fn over_quota_save_is_skipped() {
        let ws = TempDir::new().unwrap();
        let src = source_tree(&ws);

        fetch_cache(&ws)
            .args(["--max-size", "1.4Ki", "save", "image", "to-save"])
            .arg(&src)
            .assert()
            .success()
            .stdout(predicate::str::contains("not cached"));

        fetch_cache(&ws)
            .args(["has", "image", "to-save"])
            .assert()
            .code(1);
    }

    #[test]
    fn config_file_max_size_applies() {
        let ws = TempDir::new().unwrap();
        let src = source_tree(&ws);
        fs::write(
            ws.path().join("config.toml"),
            "[cache]\nmax_size = \"1Ki\"\n",
        )
        .unwrap();

        fetch_cache(&ws)
            .args(["save", "", "v1"])
            .arg(&src)
            .assert()
            .success();

        fetch_cache(&ws).args(["has", "", "v1"]).assert().code(1);
    }

    #[test]
    fn cache_dir_from_environment() {
        let ws = TempDir::new().unwrap();
        let src = source_tree(&ws);
        let root = ws.path().join("env-root");

        let mut cmd = cargo_bin_cmd!("fetch-cache");
        cmd.env("FETCH_CACHE_DIR", &root)
            .env("FETCH_CACHE_MAX_SIZE", "10Mi")
            .env_remove("FETCH_CACHE_CONFIG")
            .arg("--config")
            .arg(ws.path().join("config.toml"))
            .args(["save", "helm", "1.2.3"])
            .arg(&src)
            .assert()
            .success();

        assert!(root.join(".vendir-cache/fetcher/helm/MS4yLjM=").is_dir());
    }

    #[test]
    fn debug_logs_cli_overrides() {
        let ws = TempDir::new().unwrap();
        fetch_cache(&ws)
            .args(["-vv", "--max-size", "2Mi", "has", "git", "v1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Cache root overridden"))
            .stderr(predicate::str::contains("Cache max size overridden: 2Mi"));
    }

    #[test]
    fn save_refuses_directory_holding_cache() {
        let ws = TempDir::new().unwrap();
        source_tree(&ws);

        fetch_cache(&ws)
            .args(["save", "git", "v1"])
            .arg(ws.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("overlaps the cache directory"));

        assert!(!ws.path().join("root/.vendir-cache/fetcher/git").exists());
    }

    #[test]
    fn has_json_reports_miss() {
        let ws = TempDir::new().unwrap();
        fetch_cache(&ws)
            .args(["has", "git", "nope", "--format", "json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("\"hit\": false"));
    }

    #[test]
    fn restore_missing_entry_fails() {
        let ws = TempDir::new().unwrap();
        fetch_cache(&ws)
            .args(["restore", "git", "nope"])
            .arg(ws.path().join("out"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cache entry not found"));
    }

    #[test]
    fn invalid_max_size_fails() {
        let ws = TempDir::new().unwrap();
        fetch_cache(&ws)
            .args(["--max-size", "lots", "has", "git", "v1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid cache size"));
    }

    #[test]
    fn no_cache_skips_save() {
        let ws = TempDir::new().unwrap();
        let src = source_tree(&ws);

        fetch_cache(&ws)
            .args(["--no-cache", "save", "git", "v1"])
            .arg(&src)
            .assert()
            .success()
            .stdout(predicate::str::contains("caching is disabled"));

        fetch_cache(&ws).args(["has", "git", "v1"]).assert().code(1);
        assert!(!ws.path().join("root/.vendir-cache").exists());
    }

    #[test]
    fn size_prints_bytes() {
        let ws = TempDir::new().unwrap();
        let src = source_tree(&ws);
        fetch_cache(&ws)
            .arg("size")
            .arg(&src)
            .assert()
            .success()
            .stdout("1500\n");
    }

    #[test]
    fn inspect_shows_encoded_key() {
        let ws = TempDir::new().unwrap();
        fetch_cache(&ws)
            .args(["inspect", "some-type", "some:present", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("c29tZTpwcmVzZW50"))
            .stdout(predicate::str::contains("\"exists\": false"));
    }

    #[test]
    fn config_path() {
        let ws = TempDir::new().unwrap();
        fetch_cache(&ws)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let ws = TempDir::new().unwrap();
        fetch_cache(&ws)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));
        assert!(ws.path().join("config.toml").is_file());

        fetch_cache(&ws)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("max_size = \"1Mi\""));
    }
}
