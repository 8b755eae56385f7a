use std::fs::{self, File};
use std::io::{BufReader, BufWriter};

use hanabi_cli::config::{ArbiterConfig, OutputFormat};
use hanabi_cli::runner::Arbiter;
use hanabi_core::game::result::{EndReason, GameResult};
use tempfile::tempdir;

const COMMANDS: &str = "\
Start new game with deck R1 R2 R3 R4 R5 G1 G2 G3 G4 G5 B1 B2 B3
Tell color Green for cards 0 1 2 3 4
Tell rank 1 for cards 0
Play card 0
Drop card 0
Play card 0

Start new game with deck W1 W2 W3 W4 W5 Y1 Y2 Y3 Y4 Y5 B1
Tell color Red for cards 0
";

fn load_config(dir: &std::path::Path) -> ArbiterConfig {
    let yaml = format!(
        r#"
input:
  path: "{input}"
output:
  path: "{output}"
  format: "jsonl"
logging:
  enable_structured: false
"#,
        input = dir.join("games.txt").display(),
        output = dir.join("results.jsonl").display(),
    );
    let mut cfg: ArbiterConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn session_file_produces_one_row_per_game() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("games.txt"), COMMANDS).expect("write commands");
    let config = load_config(dir.path());
    assert_eq!(config.output.format, OutputFormat::Jsonl);

    let input_path = config.input.path.clone().expect("input path");
    let output_path = config.output.path.clone().expect("output path");
    let input = BufReader::new(File::open(&input_path).expect("open input"));
    let output = File::create(&output_path).expect("create output");
    let output = BufWriter::new(output);

    let summary = Arbiter::new(config)
        .run(input, output)
        .expect("run completes");
    assert_eq!(summary.games_finished, 2);
    assert_eq!(summary.skipped, 0);

    let rows: Vec<GameResult> = fs::read_to_string(&output_path)
        .expect("output readable")
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes"))
        .collect();

    // R1 is played on a rank hint, R2 blind; the second game dies on a false hint
    assert_eq!(
        rows,
        vec![
            GameResult {
                turns: 5,
                played_cards: 2,
                risked_turns: 1,
                ending: EndReason::DeckExhausted,
            },
            GameResult {
                turns: 1,
                played_cards: 0,
                risked_turns: 0,
                ending: EndReason::Contradiction,
            },
        ]
    );
}

#[test]
fn lenient_config_survives_garbage() {
    let dir = tempdir().expect("temp dir");
    let mut config = load_config(dir.path());
    config.input.strict = false;
    config.output.format = OutputFormat::Text;

    let input = "\
Drop card 0
shuffle please
Start new game with deck R1 R2 R3 R4 R5 G1 G2 G3 G4 G5 B1 B2
Play card 0
Play card 0
";
    let mut out = Vec::new();
    let summary = Arbiter::new(config)
        .run(input.as_bytes(), &mut out)
        .expect("lenient run completes");

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.lines_read, 5);
    // second player's G1 is blind but legal, then the deck runs dry
    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "Turn: 2, cards: 2, with risk: 2\n"
    );
}
