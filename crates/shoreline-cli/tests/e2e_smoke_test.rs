use std::{fs, path::Path};

use tempfile::{TempDir, tempdir};

use shoreline::ShorelineError;
use shoreline_cli::{Args, Command, FeedbackAction, execute};

/// A scratch workspace with an empty config file and a data directory.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempdir().expect("Failed to create temp directory");
        fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn args(&self, command: Command) -> Args {
        Args {
            command,
            config: Some(self.path().join("config.toml").to_string_lossy().to_string()),
            data_dir: Some(self.path().join("data")),
            log_level: "off".to_string(),
        }
    }

    fn run(&self, command: Command) -> Result<String, ShorelineError> {
        let mut out = Vec::new();
        execute(&self.args(command), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }
}

#[test]
fn e2e_beaches_by_zone() {
    let sandbox = Sandbox::new();

    let all = sandbox
        .run(Command::Beaches {
            zone: "ALL".parse().unwrap(),
        })
        .unwrap();
    assert_eq!(all.lines().filter(|line| !line.starts_with(' ')).count(), 4);

    let south = sandbox
        .run(Command::Beaches {
            zone: "south".parse().unwrap(),
        })
        .unwrap();
    assert!(south.starts_with("Nungwi Beach (Tanzania) [SOUTH]"));
    assert!(!south.contains("Bondi"));
}

#[test]
fn e2e_gallery_and_sections() {
    let sandbox = Sandbox::new();

    let gallery = sandbox.run(Command::Gallery { limit: 3 }).unwrap();
    assert_eq!(gallery.lines().count(), 3);

    let sections = sandbox.run(Command::Sections).unwrap();
    let first: Vec<_> = sections.lines().take(2).collect();
    assert_eq!(first, ["Home\t#home", "Gallery\t#gallery"]);
    assert!(sections.contains("Travel\t#ads"));
}

#[test]
fn e2e_feedback_roundtrip() {
    let sandbox = Sandbox::new();

    let submitted = sandbox
        .run(Command::Feedback {
            action: FeedbackAction::Submit {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                message: "Add Anse Lazio".to_string(),
            },
        })
        .unwrap();
    assert_eq!(submitted.trim(), "Thanks for your feedback!");
    assert!(sandbox.path().join("data").join("bb_feedback.json").is_file());

    let listed = sandbox
        .run(Command::Feedback {
            action: FeedbackAction::List { all: false },
        })
        .unwrap();
    assert!(listed.starts_with("Ada <ada@example.com>"));
    assert!(listed.contains("  Add Anse Lazio"));
}

#[test]
fn e2e_invalid_feedback_is_rejected() {
    let sandbox = Sandbox::new();

    let err = sandbox
        .run(Command::Feedback {
            action: FeedbackAction::Submit {
                name: "Ada".to_string(),
                email: "not-an-email".to_string(),
                message: "hi".to_string(),
            },
        })
        .unwrap_err();
    assert!(matches!(err, ShorelineError::Feedback(_)));
    assert!(!sandbox.path().join("data").join("bb_feedback.json").exists());
}

#[test]
fn e2e_visit_counter_persists() {
    let sandbox = Sandbox::new();

    assert_eq!(sandbox.run(Command::Visit).unwrap(), "Visitors: 1\n");
    assert_eq!(sandbox.run(Command::Visit).unwrap(), "Visitors: 2\n");
}

#[test]
fn e2e_export_writes_document() {
    let sandbox = Sandbox::new();
    let output = sandbox.path().join("BeautyOfBeaches.doc");

    sandbox
        .run(Command::Export {
            output: output.clone(),
        })
        .unwrap();

    let document = fs::read_to_string(&output).unwrap();
    assert!(document.starts_with("<!DOCTYPE html>"));
    assert!(document.contains("Grace Bay Beach"));
}

#[test]
fn e2e_tour_reports_active_sections() {
    let sandbox = Sandbox::new();

    let output = sandbox
        .run(Command::Tour {
            steps: vec![
                "zones".parse().unwrap(),
                "about".parse().unwrap(),
                "@0".parse().unwrap(),
            ],
        })
        .unwrap();

    let actives: Vec<_> = output
        .lines()
        .map(|line| line.rsplit('\t').next().unwrap())
        .collect();
    assert_eq!(actives, ["home", "zones", "about", "home"]);
}

#[test]
fn e2e_tour_scroll_after_unreachable_section() {
    let sandbox = Sandbox::new();

    let output = sandbox
        .run(Command::Tour {
            steps: ["sitemap", "@0", "@1300"]
                .iter()
                .map(|step| step.parse().unwrap())
                .collect(),
        })
        .unwrap();

    let actives: Vec<_> = output
        .lines()
        .map(|line| line.rsplit('\t').next().unwrap())
        .collect();
    assert_eq!(actives, ["home", "sitemap", "home", "zones"]);
}

#[test]
fn e2e_ticker_with_coordinates() {
    let sandbox = Sandbox::new();

    let line = sandbox
        .run(Command::Ticker {
            lat: Some(6.45407),
            lon: Some(3.39467),
        })
        .unwrap();
    assert!(line.starts_with("Date: "));
    assert!(line.trim_end().ends_with("Location: 6.4541, 3.3947"));
}

#[test]
fn e2e_missing_config_fails() {
    let sandbox = Sandbox::new();
    let mut args = sandbox.args(Command::Sections);
    args.config = Some(sandbox.path().join("absent.toml").to_string_lossy().to_string());

    let err = execute(&args, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ShorelineError::Config(_)));
}
