//! Scripted input for the simulator.
//!
//! ```json
//! [
//!   { "click": { "target": ".accordion__header" } },
//!   { "advance": { "ms": 700 } },
//!   "load"
//! ]
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, anyhow};
use log::debug;
use serde::Deserialize;
use webdom::{Document, Host, NodeId, Rect};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Click { target: String },
    Enter { target: String },
    Leave { target: String },
    Move { target: String, x: f32, y: f32 },
    Input { target: String, value: String },
    Visibility { target: String, ratio: f32 },
    /// Resize an element, keeping its position.
    Resize { target: String, width: f32, height: f32 },
    ResizeWindow { width: f32, height: f32 },
    Load,
    Advance { ms: u64 },
}

pub fn load(path: &Path) -> anyhow::Result<Vec<Step>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("failed to parse script {}", path.display()))
}

fn resolve(document: &Document, selector: &str) -> anyhow::Result<NodeId> {
    document
        .try_query_all(selector)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no element matches `{selector}`"))
}

pub fn run(document: &Document, steps: &[Step]) -> anyhow::Result<()> {
    for (index, step) in steps.iter().enumerate() {
        debug!("step {index}: {step:?}");
        match step {
            Step::Click { target } => document.click(resolve(document, target)?),
            Step::Enter { target } => document.enter(resolve(document, target)?),
            Step::Leave { target } => document.leave(resolve(document, target)?),
            Step::Move { target, x, y } => {
                document.move_pointer(resolve(document, target)?, *x, *y)
            }
            Step::Input { target, value } => document.input(resolve(document, target)?, value),
            Step::Visibility { target, ratio } => {
                document.set_visibility(resolve(document, target)?, *ratio)
            }
            Step::Resize {
                target,
                width,
                height,
            } => {
                let node = resolve(document, target)?;
                let rect = document.measure(node).rect;
                document.set_rect(node, Rect::new(rect.x, rect.y, *width, *height));
            }
            Step::ResizeWindow { width, height } => document.resize_window(*width, *height),
            Step::Load => document.load(),
            Step::Advance { ms } => document.advance(Duration::from_millis(*ms)),
        }
        document.flush();
    }
    Ok(())
}
