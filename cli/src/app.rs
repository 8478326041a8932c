//! Command line session: load an image, resolve clicks, run pick actions.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use huepick_core::{
    report, BoundingBox, HostAdapter, ImageSource, PickAction, PickEvent, PickLog, PickerSession,
    ViewportPoint,
};
use huepick_platform::{DocumentCursor, TerminalHost};
use tracing::{debug, info, warn};

use crate::args::{parse_point, Cli, InsertTarget};
use crate::config::AppConfig;

/// Resolved run options: command line flags layered over the config file.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub image: Option<PathBuf>,
    pub points: Vec<ViewportPoint>,
    pub display: Option<BoundingBox>,
    pub actions: Vec<PickAction>,
    pub insert: Option<InsertTarget>,
    pub json: bool,
    pub log_path: PathBuf,
    pub desktop: bool,
}

impl RunOptions {
    pub fn resolve(cli: &Cli, config: &AppConfig) -> Self {
        Self {
            image: cli.image.clone(),
            points: cli.at.clone(),
            display: cli.display,
            actions: cli.actions(),
            insert: cli.insert.clone(),
            json: cli.json || config.output.json,
            log_path: cli
                .log_file
                .clone()
                .unwrap_or_else(|| config.log.effective_path()),
            desktop: cli.desktop || config.host.desktop,
        }
    }
}

/// Run against the process's stdin and stdout.
pub async fn run(cli: Cli, config: AppConfig) -> Result<ExitCode> {
    run_with(RunOptions::resolve(&cli, &config), TerminalHost::stdio()).await
}

fn document_cursor(target: &InsertTarget) -> DocumentCursor {
    match target.offset {
        Some(offset) => DocumentCursor::new(&target.path, offset),
        None => DocumentCursor::at_end(&target.path),
    }
}

/// Run a session. `terminal` carries click input and pick output; user-facing
/// notices, the clipboard and the file picker go through the desktop host when
/// one is requested and available.
pub async fn run_with(options: RunOptions, mut terminal: TerminalHost) -> Result<ExitCode> {
    let cursor = options.insert.as_ref().map(document_cursor);

    #[cfg(feature = "desktop")]
    let desktop = if options.desktop {
        let host = huepick_platform::DesktopHost::new();
        Some(match cursor {
            Some(cursor) => host.with_document(cursor),
            None => host,
        })
    } else {
        if let Some(cursor) = cursor {
            terminal = terminal.with_document(cursor);
        }
        None
    };
    #[cfg(feature = "desktop")]
    let host: &dyn HostAdapter = match &desktop {
        Some(desktop) => desktop,
        None => &terminal,
    };

    #[cfg(not(feature = "desktop"))]
    let host: &dyn HostAdapter = {
        if options.desktop {
            warn!("desktop host requested but this build lacks the `desktop` feature, using the terminal");
        }
        if let Some(cursor) = cursor {
            terminal = terminal.with_document(cursor);
        }
        &terminal
    };

    let mut session = PickerSession::new(PickLog::new(&options.log_path));

    let loaded = match &options.image {
        Some(path) => session.initialize(&ImageSource::path(path)).await.map(Some),
        None => session.initialize_from_picker(host).await,
    };
    match loaded {
        Ok(Some(ready)) => {
            info!(width = ready.width, height = ready.height, "image loaded");
        }
        Ok(None) => {
            info!("no image selected");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            report(host, &e).await;
            warn!(error = %e, "failed to load image");
            return Ok(ExitCode::FAILURE);
        }
    }

    if !options.points.is_empty() {
        for point in &options.points {
            handle_click(&session, host, &terminal, &options, *point).await?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    while let Some(line) = terminal.read_line().await.context("failed to read input")? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(path) = line.strip_prefix("open ") {
            // Reload; the previous image stays active when this one fails
            if let Err(e) = session.initialize(&ImageSource::path(path.trim())).await {
                report(host, &e).await;
            }
            continue;
        }
        match parse_point(line) {
            Ok(point) => handle_click(&session, host, &terminal, &options, point).await?,
            Err(reason) => {
                debug!(line, "unparsable click");
                terminal
                    .write_line(&format!("error: {reason}"))
                    .await
                    .context("failed to write output")?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_click(
    session: &PickerSession,
    host: &dyn HostAdapter,
    terminal: &TerminalHost,
    options: &RunOptions,
    point: ViewportPoint,
) -> Result<()> {
    let bbox = match (options.display, session.dimensions()) {
        (Some(bbox), _) => bbox,
        (None, Some((width, height))) => BoundingBox::native(width, height),
        (None, None) => return Ok(()),
    };

    let event = session.pick(point, bbox);
    terminal
        .write_line(&render(event.as_ref(), options.json)?)
        .await
        .context("failed to write output")?;

    if let Some(event) = &event {
        for action in &options.actions {
            if let Err(e) = session.apply(host, event, *action).await {
                warn!(error = %e, ?action, "pick action failed");
                report(host, &e).await;
            }
        }
    }
    Ok(())
}

/// One output line for a click.
pub fn render(event: Option<&PickEvent>, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(&event).context("failed to serialize pick");
    }
    Ok(match event {
        Some(event) => format!("{} {} {}", event.hex, event.rgb(), event.position),
        None => "no color".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use huepick_core::{Color, PixelPosition};
    use std::io::Cursor;
    use tokio::io::AsyncReadExt;

    /// 2x1: red on the left, transparent on the right.
    const HALF_RED_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="1"><rect width="1" height="1" fill="#ff0000"/></svg>"##;

    fn options(image: PathBuf, log_path: PathBuf) -> RunOptions {
        RunOptions {
            image: Some(image),
            points: Vec::new(),
            display: None,
            actions: Vec::new(),
            insert: None,
            json: false,
            log_path,
            desktop: false,
        }
    }

    async fn run_session(options: RunOptions, input: &str) -> (ExitCode, String) {
        let (writer, mut reader) = tokio::io::duplex(64 * 1024);
        let terminal = TerminalHost::new(
            Cursor::new(input.as_bytes().to_vec()),
            writer,
            tokio::io::sink(),
        );
        let code = run_with(options, terminal).await.unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).await.unwrap();
        (code, out)
    }

    #[test]
    fn test_render() {
        let event = PickEvent::new(Color::new(255, 0, 0), PixelPosition::new(0, 1));
        assert_eq!(
            render(Some(&event), false).unwrap(),
            "#ff0000 rgb(255, 0, 0) (0, 1)"
        );
        assert_eq!(render(None, false).unwrap(), "no color");
        assert_eq!(render(None, true).unwrap(), "null");
        assert!(render(Some(&event), true)
            .unwrap()
            .contains("\"hex\":\"#ff0000\""));
    }

    #[tokio::test]
    async fn clicks_from_input_are_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("half.svg");
        std::fs::write(&image, HALF_RED_SVG).unwrap();

        let opts = options(image, dir.path().join("picks.txt"));
        let (code, out) = run_session(opts, "0 0\n# comment\n1.5,0.5\nbogus\n").await;

        assert_eq!(code, ExitCode::SUCCESS);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "#ff0000 rgb(255, 0, 0) (0, 0)");
        assert_eq!(lines[1], "no color");
        assert!(lines[2].starts_with("error: "));
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn fixed_points_with_display_box_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("half.svg");
        std::fs::write(&image, HALF_RED_SVG).unwrap();
        let log_path = dir.path().join("picks.txt");

        let mut opts = options(image, log_path.clone());
        opts.display = Some(BoundingBox::new(10.0, 10.0, 20.0, 10.0));
        opts.points = vec![ViewportPoint::new(15.0, 15.0), ViewportPoint::new(5.0, 5.0)];
        opts.actions = vec![PickAction::Save];
        opts.json = true;

        let (code, out) = run_session(opts, "").await;
        assert_eq!(code, ExitCode::SUCCESS);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"hex\":\"#ff0000\""));
        assert_eq!(lines[1], "null");

        let saved = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(saved.lines().count(), 1);
        assert!(saved.trim_end().ends_with("Z: #ff0000"));
    }

    #[tokio::test]
    async fn missing_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path().join("nope.png"), dir.path().join("picks.txt"));
        let (code, out) = run_session(opts, "0 0\n").await;
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn open_command_reloads_and_keeps_previous_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let red = dir.path().join("half.svg");
        std::fs::write(&red, HALF_RED_SVG).unwrap();
        let blue = dir.path().join("blue.svg");
        std::fs::write(
            &blue,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"><rect width="1" height="1" fill="#0000ff"/></svg>"##,
        )
        .unwrap();

        let input = format!(
            "open {}\n0,0\nopen {}\n0,0\n",
            dir.path().join("missing.png").display(),
            blue.display()
        );
        let (code, out) = run_session(options(red, dir.path().join("p.txt")), &input).await;
        assert_eq!(code, ExitCode::SUCCESS);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["#ff0000 rgb(255, 0, 0) (0, 0)", "#0000ff rgb(0, 0, 255) (0, 0)"]);
    }

    #[tokio::test]
    async fn insert_writes_into_document() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("half.svg");
        std::fs::write(&image, HALF_RED_SVG).unwrap();
        let doc = dir.path().join("style.css");
        std::fs::write(&doc, "a { color: ; }").unwrap();

        let mut opts = options(image, dir.path().join("p.txt"));
        opts.actions = vec![PickAction::Insert];
        opts.insert = Some(InsertTarget {
            path: doc.clone(),
            offset: Some(11),
        });
        opts.points = vec![ViewportPoint::new(0.5, 0.5)];

        let (code, _) = run_session(opts, "").await;
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(std::fs::read_to_string(&doc).unwrap(), "a { color: #ff0000; }");
    }

    #[tokio::test]
    async fn copy_keeps_json_output_one_pick_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("half.svg");
        std::fs::write(&image, HALF_RED_SVG).unwrap();

        let mut opts = options(image, dir.path().join("p.txt"));
        opts.actions = vec![PickAction::Copy];
        opts.json = true;
        opts.points = vec![ViewportPoint::new(0.0, 0.0), ViewportPoint::new(0.5, 0.5)];

        let (code, out) = run_session(opts, "").await;
        assert_eq!(code, ExitCode::SUCCESS);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let event: PickEvent = serde_json::from_str(line).unwrap();
            assert_eq!(event.hex, "#ff0000");
        }
        assert!(!out.contains('\x1b'));
    }
}
