mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::Server;
    use predicates::str::{contains, starts_with};

    use std::io::Write;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "urlprobe";

    fn url_file(urls: &[String]) -> Result<tempfile::NamedTempFile, std::io::Error> {
        let mut file = tempfile::NamedTempFile::new()?;
        for url in urls {
            writeln!(file, "{url}")?;
        }
        Ok(file)
    }

    fn probe_cmd() -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg("--no-config").arg("--delay").arg("0").arg("--no-progress");
        Ok(cmd)
    }

    #[test]
    fn test_output__when_no_urls_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert()
            .failure()
            .stderr(contains("Error: No URLs provided"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__text_report() -> TestResult {
        let mut server = Server::new_async().await;
        let _ok = server.mock("GET", "/ok").with_status(200).create_async().await;
        let _missing = server.mock("GET", "/missing").with_status(404).create_async().await;
        let _moved = server
            .mock("GET", "/moved")
            .with_status(301)
            .with_header("location", "/ok")
            .create_async()
            .await;
        let file = url_file(&[
            server.url() + "/ok",
            server.url() + "/missing",
            server.url() + "/moved",
        ])?;
        let mut cmd = probe_cmd()?;

        cmd.arg(file.path());

        cmd.assert()
            .success()
            .stdout(contains("Total URLs:       3"))
            .stdout(contains("Success (2xx):    2"))
            .stdout(contains("Errors (4xx/5xx): 1"))
            .stdout(contains("Status Code Distribution"))
            .stdout(contains(format!("→ 301 {}/moved", server.url())))
            .stdout(contains(format!("🟠 404     {}/missing", server.url())));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__csv_keeps_input_order() -> TestResult {
        let mut server = Server::new_async().await;
        let _a = server.mock("GET", "/a").with_status(200).create_async().await;
        let _b = server.mock("GET", "/b").with_status(503).create_async().await;
        let _c = server
            .mock("GET", "/c")
            .with_status(302)
            .with_header("location", "/a")
            .create_async()
            .await;
        let base = server.url();
        let mut cmd = probe_cmd()?;

        cmd.args(["--format", "csv"])
            .args(["--url", &format!("{base}/c")])
            .args(["--url", &format!("{base}/b")])
            .args(["--url", &format!("{base}/a")]);

        let output = cmd.output()?;
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout)?;
        let lines: Vec<&str> = stdout.lines().collect();

        assert_eq!(lines[0], "URL,Status Code,Final URL,Hop 1,Hop 2,Hop 3,Hop 4,Hop 5");
        assert_eq!(
            lines[1],
            format!("{base}/c,200,{base}/a,{base}/c,{base}/a,,,")
        );
        assert_eq!(lines[2], format!("{base}/b,503,{base}/b,{base}/b,,,,"));
        assert_eq!(lines[3], format!("{base}/a,200,{base}/a,{base}/a,,,,"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__json_report() -> TestResult {
        let mut server = Server::new_async().await;
        let _ok = server.mock("GET", "/ok").with_status(200).create_async().await;
        let file = url_file(&[server.url() + "/ok", "http://127.0.0.1:1/refused".to_string()])?;
        let mut cmd = probe_cmd()?;

        cmd.arg(file.path()).args(["--format", "json"]);

        let output = cmd.output()?;
        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

        assert_eq!(report["summary"]["total"], 2);
        assert_eq!(report["summary"]["success_count"], 1);
        assert_eq!(report["summary"]["transport_error_count"], 1);
        assert_eq!(report["results"][0]["status"], "200");
        assert_eq!(report["results"][1]["status"], "Error");
        assert_eq!(report["results"][1]["kind"], "transport_error");
        Ok(())
    }

    #[tokio::test]
    async fn test_output__stdin_dedup_and_status_filter() -> TestResult {
        let mut server = Server::new_async().await;
        let _ok = server.mock("GET", "/ok").with_status(200).create_async().await;
        let _gone = server.mock("GET", "/gone").with_status(410).create_async().await;
        let input = format!(
            "{0}/ok\n\n  {0}/gone  \n{0}/ok\n",
            server.url()
        );

        let mut cmd = assert_cmd::Command::cargo_bin(NAME)?;
        cmd.args(["--no-config", "--delay", "0", "--format", "csv", "--status", "410", "-"])
            .write_stdin(input);

        let output = cmd.output()?;
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout)?;
        let lines: Vec<&str> = stdout.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(&format!("{}/gone,410,", server.url())));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__report_written_to_file() -> TestResult {
        let mut server = Server::new_async().await;
        let _ok = server.mock("GET", "/ok").with_status(200).create_async().await;
        let dir = tempfile::TempDir::new()?;
        let report_path = dir.path().join("results.csv");
        let mut cmd = probe_cmd()?;

        cmd.args(["--url", &(server.url() + "/ok")])
            .args(["--format", "csv", "--output"])
            .arg(&report_path);

        cmd.assert().success().stdout("");
        let written = std::fs::read_to_string(&report_path)?;
        assert!(written.starts_with("URL,Status Code,Final URL"));
        assert!(written.contains(&format!("{}/ok,200,", server.url())));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__custom_headers_replace_defaults() -> TestResult {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/ok")
            .match_header("user-agent", "link-audit/2.0")
            .with_status(200)
            .create_async()
            .await;
        let mut cmd = probe_cmd()?;

        cmd.args(["--url", &(server.url() + "/ok")])
            .args(["--headers-json", r#"{"User-Agent": "link-audit/2.0"}"#])
            .args(["--format", "csv"]);

        cmd.assert().success().stdout(contains(",200,"));
        Ok(())
    }

    #[test]
    fn test_output__when_workers_out_of_range() -> TestResult {
        let mut cmd = probe_cmd()?;

        cmd.args(["--url", "http://127.0.0.1:1/", "--workers", "50"]);

        cmd.assert()
            .failure()
            .stderr(contains("Worker count 50 is out of range"));
        Ok(())
    }

    #[test]
    fn test_output__when_timeout_out_of_range() -> TestResult {
        let mut cmd = probe_cmd()?;

        cmd.args(["--url", "http://127.0.0.1:1/", "--timeout", "100"]);

        cmd.assert()
            .failure()
            .stderr(contains("Timeout of 100ms is out of range"));
        Ok(())
    }

    #[test]
    fn test_output__when_headers_malformed() -> TestResult {
        let mut cmd = probe_cmd()?;

        cmd.args(["--url", "http://127.0.0.1:1/", "--headers-json", "[\"nope\"]"]);

        cmd.assert()
            .failure()
            .stderr(contains("Custom headers must be a JSON object"));
        Ok(())
    }

    #[test]
    fn test_output__when_url_file_missing() -> TestResult {
        let mut cmd = probe_cmd()?;

        cmd.arg("/nonexistent/urls.txt");

        cmd.assert()
            .failure()
            .stderr(contains("Could not read URL list"));
        Ok(())
    }

    #[test]
    fn test_output__when_input_only_blank_lines() -> TestResult {
        let file = url_file(&["".to_string(), "   ".to_string()])?;
        let mut cmd = probe_cmd()?;

        cmd.arg(file.path());

        cmd.assert()
            .failure()
            .stderr(contains("No URLs found in the given input"));
        Ok(())
    }

    #[test]
    fn test_completion_generate__bash() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["completion-generate", "bash"]);

        cmd.assert()
            .success()
            .stdout(starts_with("_urlprobe()"))
            .stdout(contains("--headers-json"));
        Ok(())
    }

    #[test]
    fn test_config_file__values_are_used() -> TestResult {
        let mut config = tempfile::NamedTempFile::new()?;
        writeln!(config, "max_workers = 99")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config")
            .arg(config.path())
            .args(["--url", "http://127.0.0.1:1/"]);

        cmd.assert()
            .failure()
            .stderr(contains("Worker count 99 is out of range"));
        Ok(())
    }
}
