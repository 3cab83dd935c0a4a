//! Terminal preview of the headline typewriter.

use std::fmt::Write as _;
use std::io::Write as _;
use std::time::Duration;

use folio_core::cycle::{TimedFrame, TitleCycler, TitleFrame};
use tokio_util::sync::CancellationToken;

use super::load_content;
use crate::cli::args::{OutputFormat, PreviewArgs};
use crate::cycler::spawn_title_cycler_until;
use crate::error::FolioError;

/// Play the typewriter, or print one cycle's timeline.
///
/// # Errors
///
/// Returns a content error if loading fails, or an I/O error if stdout
/// cannot be written.
pub async fn run(args: &PreviewArgs, cancel: CancellationToken) -> Result<(), FolioError> {
    let loaded = load_content(&args.content)?;
    let profile = &loaded.content.profile;
    let timing = loaded.content.title_cycle;

    let Some(cycler) = TitleCycler::new(profile.titles.clone(), timing) else {
        tracing::info!("no titles; nothing to animate");
        println!("{}", profile.name);
        return Ok(());
    };

    if args.timeline {
        print!("{}", format_timeline(&cycler.timeline(), args.format)?);
        return Ok(());
    }

    let duration = args.duration.unwrap_or_else(|| cycler.cycle_duration());
    play(profile.titles.clone(), timing, duration, &cancel).await
}

async fn play(
    titles: Vec<String>,
    timing: folio_core::content::CycleTiming,
    duration: Duration,
    cancel: &CancellationToken,
) -> Result<(), FolioError> {
    let Some(handle) = spawn_title_cycler_until(titles, timing, cancel) else {
        return Ok(());
    };
    let mut frames = handle.frames();
    let deadline = tokio::time::sleep(duration);
    tokio::pin!(deadline);

    draw(&frames.borrow_and_update())?;
    loop {
        tokio::select! {
            () = &mut deadline => break,
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = frames.borrow_and_update().clone();
                draw(&frame)?;
            }
        }
    }
    handle.dispose();
    println!();
    Ok(())
}

fn draw(frame: &TitleFrame) -> std::io::Result<()> {
    let mut out = std::io::stdout();
    write!(out, "\r\x1b[2K{}\u{258c}", frame.text)?;
    out.flush()
}

/// Formats timeline frames, one per line or as a JSON array.
fn format_timeline(frames: &[TimedFrame], format: OutputFormat) -> Result<String, FolioError> {
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            for f in frames {
                let _ = writeln!(
                    out,
                    "{:>7}ms  [{}] {:?}",
                    f.at.as_millis(),
                    f.frame.word_index,
                    f.frame.text
                );
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> = frames
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "at_ms": u64::try_from(f.at.as_millis()).unwrap_or(u64::MAX),
                        "word_index": f.frame.word_index,
                        "revealed": f.frame.revealed,
                        "text": f.frame.text,
                    })
                })
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&items)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core::content::CycleTiming;

    use super::*;

    fn go_rust() -> TitleCycler {
        TitleCycler::new(
            vec!["Go".to_string(), "Rust".to_string()],
            CycleTiming {
                interval: Duration::from_millis(100),
                pause: Duration::from_millis(200),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_human_timeline() {
        let text = format_timeline(&go_rust().timeline(), OutputFormat::Human).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "    100ms  [0] \"G\"");
        assert_eq!(lines[2], "    400ms  [1] \"\"");
        assert_eq!(lines[7], "   1000ms  [0] \"\"");
    }

    #[test]
    fn test_json_timeline() {
        let text = format_timeline(&go_rust().timeline(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let frames = value.as_array().unwrap();
        assert_eq!(frames.len(), 8);
        assert_eq!(frames[6]["at_ms"], 800);
        assert_eq!(frames[6]["text"], "Rust");
        assert_eq!(frames[6]["revealed"], 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_stops_at_deadline() {
        let cancel = CancellationToken::new();
        let start = tokio::time::Instant::now();
        play(
            vec!["Go".to_string()],
            CycleTiming::default(),
            Duration::from_millis(250),
            &cancel,
        )
        .await
        .unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_stops_on_cancel() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        play(
            vec!["Go".to_string()],
            CycleTiming::default(),
            Duration::from_secs(3600),
            &cancel,
        )
        .await
        .unwrap();
    }
}
