use std::path::PathBuf;

use clap::Parser;
use huepick_core::{BoundingBox, PickAction, ViewportPoint};

#[derive(Parser, Debug)]
#[command(name = "huepick")]
#[command(version, about = "Pick pixel colors from images")]
pub struct Cli {
    /// Image to open (PNG, JPEG, GIF, BMP, WebP, SVG). Prompts for a file when omitted
    pub image: Option<PathBuf>,

    /// Click position in display coordinates. Repeatable; clicks are read
    /// from stdin when omitted
    #[arg(long = "at", value_name = "X,Y", value_parser = parse_point)]
    pub at: Vec<ViewportPoint>,

    /// On-screen rectangle of the image. Defaults to the native size at the origin
    #[arg(long, value_name = "WxH[+LEFT+TOP]", value_parser = parse_display)]
    pub display: Option<BoundingBox>,

    /// Copy each picked color to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Append each picked color to the pick log
    #[arg(long)]
    pub save: bool,

    /// Insert each picked color into FILE at byte OFFSET (end of file when omitted)
    #[arg(long, value_name = "FILE[:OFFSET]", value_parser = parse_insert)]
    pub insert: Option<InsertTarget>,

    /// Print picks as JSON
    #[arg(long)]
    pub json: bool,

    /// Pick log file (overrides the config)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use native dialogs and the system clipboard
    #[arg(long)]
    pub desktop: bool,
}

impl Cli {
    /// Actions to run for every pick, in a fixed order.
    pub fn actions(&self) -> Vec<PickAction> {
        let mut actions = Vec::new();
        if self.copy {
            actions.push(PickAction::Copy);
        }
        if self.save {
            actions.push(PickAction::Save);
        }
        if self.insert.is_some() {
            actions.push(PickAction::Insert);
        }
        actions
    }
}

/// Document and byte offset for `--insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertTarget {
    pub path: PathBuf,
    pub offset: Option<usize>,
}

/// Parse `X,Y` or `X Y`.
pub fn parse_point(s: &str) -> Result<ViewportPoint, String> {
    let parts: Vec<&str> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    let [x, y] = parts.as_slice() else {
        return Err(format!("expected X,Y, got {s:?}"));
    };
    let x: f64 = x.parse().map_err(|_| format!("invalid x coordinate {x:?}"))?;
    let y: f64 = y.parse().map_err(|_| format!("invalid y coordinate {y:?}"))?;
    Ok(ViewportPoint::new(x, y))
}

/// Parse `WxH` or `WxH+LEFT+TOP`.
pub fn parse_display(s: &str) -> Result<BoundingBox, String> {
    let mut parts = s.split('+');
    let size = parts.next().unwrap_or_default();
    let (w, h) = size
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {s:?}"))?;
    let num = |v: &str, what: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid {what} {v:?}"))
    };
    let width = num(w, "width")?;
    let height = num(h, "height")?;
    if !(width > 0.0 && height > 0.0) {
        return Err("display size must be positive".into());
    }

    let (left, top) = match (parts.next(), parts.next(), parts.next()) {
        (None, None, None) => (0.0, 0.0),
        (Some(l), Some(t), None) => (num(l, "left")?, num(t, "top")?),
        _ => return Err(format!("expected WxH+LEFT+TOP, got {s:?}")),
    };
    Ok(BoundingBox::new(left, top, width, height))
}

/// Parse `FILE` or `FILE:OFFSET`.
pub fn parse_insert(s: &str) -> Result<InsertTarget, String> {
    if s.is_empty() {
        return Err("empty insert target".into());
    }
    if let Some((path, offset)) = s.rsplit_once(':') {
        if let Ok(offset) = offset.parse::<usize>() {
            if !path.is_empty() {
                return Ok(InsertTarget {
                    path: PathBuf::from(path),
                    offset: Some(offset),
                });
            }
        }
    }
    Ok(InsertTarget {
        path: PathBuf::from(s),
        offset: None,
    })
}
