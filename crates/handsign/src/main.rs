use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use handsign::{config::Config, gesture::rules, record, timer::Timer};

#[derive(Parser, Debug)]
#[command(name = "handsign", about = "Hand gesture recognition from hand landmarks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify every frame of a landmark recording (JSON lines).
    Replay {
        /// Recording to read, or `-` for stdin.
        input: PathBuf,
        /// Configuration file (TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Rotate landmarks by 180° before classification.
        #[arg(long)]
        rotate_180: bool,
        /// Minimum presence score for a hand to be classified.
        #[arg(long)]
        min_presence: Option<f32>,
        /// Maximum number of hands classified per frame.
        #[arg(long)]
        max_hands: Option<usize>,
    },
    /// List the built-in gesture rules.
    Rules,
    /// Print the default configuration.
    DefaultConfig,
}

#[handsign::main]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            input,
            config,
            rotate_180,
            min_presence,
            max_hands,
        } => {
            let mut config = match config {
                Some(path) => Config::load(path)?,
                None => Config::default(),
            };
            config.rotate_180 |= rotate_180;
            if let Some(min_presence) = min_presence {
                config.min_presence = min_presence;
            }
            if let Some(max_hands) = max_hands {
                config.max_hands = max_hands;
            }
            config.validate()?;

            let reader: Box<dyn BufRead> = if input.as_os_str() == "-" {
                Box::new(io::stdin().lock())
            } else {
                let file = File::open(&input)
                    .with_context(|| format!("failed to open `{}`", input.display()))?;
                Box::new(BufReader::new(file))
            };
            replay(&config, reader, io::stdout().lock())?;
            Ok(())
        }
        Command::Rules => {
            for name in rules::names() {
                println!("{name}");
            }
            Ok(())
        }
        Command::DefaultConfig => {
            print!("{}", Config::default().to_toml_string()?);
            Ok(())
        }
    }
}

/// Totals collected while replaying a recording.
#[derive(Debug, Default, PartialEq)]
struct ReplayStats {
    frames: usize,
    recognized: usize,
    malformed: usize,
}

/// Classifies every frame in `reader` and writes one overlay label per frame to `out`.
///
/// Malformed lines are logged and skipped. Read and write errors abort the replay.
fn replay(
    config: &Config,
    reader: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<ReplayStats> {
    let classifier = config.frame_classifier()?;
    let t_classify = Timer::new("classify");

    let mut stats = ReplayStats::default();
    for frame in record::read_frames(reader) {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) if e.downcast_ref::<io::Error>().is_some() => return Err(e),
            Err(e) => {
                log::warn!("{e:#}");
                stats.malformed += 1;
                continue;
            }
        };
        let result = t_classify.time(|| classifier.classify_frame(&frame.hands));
        stats.frames += 1;
        if result.gestures().any(|g| !g.is_unknown()) {
            stats.recognized += 1;
        }
        log::trace!("line {}: {}", frame.line, result);
        writeln!(out, "frame {}: {}", frame.line, result.overlay_label())?;
    }

    log::debug!(
        "{} frames, {} with a recognized gesture, {} malformed lines skipped ({t_classify})",
        stats.frames,
        stats.recognized,
        stats.malformed,
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay_str(config: &Config, input: &str) -> (ReplayStats, String) {
        let mut out = Vec::new();
        let stats = replay(config, input.as_bytes(), &mut out).unwrap();
        (stats, String::from_utf8(out).unwrap())
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let input = "{\"hands\":[]}\nnot json\n{\"hands\":[]}\n{\"hands\":{}}\n";
        let (stats, out) = replay_str(&Config::default(), input);
        assert_eq!(out, "frame 1: \nframe 3: \n");
        assert_eq!(
            stats,
            ReplayStats {
                frames: 2,
                recognized: 0,
                malformed: 2,
            }
        );
    }

    #[test]
    fn read_error_aborts() {
        // Invalid UTF-8 cannot be read as a line.
        let input: &[u8] = b"{\"hands\":[]}\n\xff\xfe\n";
        let mut out = Vec::new();
        let err = replay(&Config::default(), input, &mut out).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err:#}");
        assert_eq!(out, b"frame 1: \n");
    }

    #[test]
    fn cli_parses_replay_flags() {
        let cli = Cli::try_parse_from([
            "handsign",
            "replay",
            "-",
            "--rotate-180",
            "--max-hands",
            "2",
        ])
        .unwrap();
        match cli.command {
            Command::Replay {
                input,
                rotate_180,
                max_hands,
                min_presence,
                config,
            } => {
                assert_eq!(input, PathBuf::from("-"));
                assert!(rotate_180);
                assert_eq!(max_hands, Some(2));
                assert_eq!(min_presence, None);
                assert_eq!(config, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
