//! Batch plotting of indexed raster series.
//!
//! LUCY writes one raster per time step, e.g.
//! `AHF_Germany_0_6_1_48_0.8.asc` .. `AHF_Germany_23_6_1_48_0.8.asc`. A batch
//! renders them in increasing index order as `<prefix>_<index>.png` frames
//! that an external tool can assemble into an animation.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::{LucyError, Result};
use crate::logging::{log_operation_end, log_operation_start};
use crate::render::Figure;

/// Placeholder replaced by the frame index in a file name template
pub const INDEX_PLACEHOLDER: &str = "{index}";

/// Input file name pattern with an `{index}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTemplate {
    template: String,
}

impl FrameTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        if !template.contains(INDEX_PLACEHOLDER) {
            return Err(LucyError::Config {
                message: format!(
                    "Batch template '{}' has no {} placeholder",
                    template, INDEX_PLACEHOLDER
                ),
            });
        }
        Ok(Self {
            template: template.to_string(),
        })
    }

    /// File name for `index`
    pub fn file_name(&self, index: usize) -> String {
        self.template.replace(INDEX_PLACEHOLDER, &index.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

/// Output name of frame `index`
pub fn frame_output_name(prefix: &str, index: usize) -> String {
    format!("{}_{}.png", prefix, index)
}

/// ImageMagick command that combines the frames of a finished batch
pub fn animation_command(prefix: &str, indices: &Range<usize>) -> String {
    format!(
        "magick convert -delay 20 \"{}_%d.png[{}-{}]\" -loop 0 {}_anim.gif",
        prefix,
        indices.start,
        indices.end.saturating_sub(1),
        prefix
    )
}

/// Indices `start..start + count`; a range past `usize::MAX` is a `Config` error
pub fn frame_range(start: usize, count: usize) -> Result<Range<usize>> {
    let end = start.checked_add(count).ok_or_else(|| LucyError::Config {
        message: format!("Frame range {} + {} overflows", start, count),
    })?;
    Ok(start..end)
}

/// Which files to read and where to write the frames
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub input_dir: PathBuf,
    pub template: FrameTemplate,
    pub indices: Range<usize>,
    pub prefix: String,
    pub output_dir: PathBuf,
}

impl BatchPlan {
    /// `(index, input path, output path)` in increasing index order
    pub fn frames(&self) -> impl Iterator<Item = (usize, PathBuf, PathBuf)> + '_ {
        self.indices.clone().map(move |index| {
            (
                index,
                self.input_dir.join(self.template.file_name(index)),
                self.output_dir.join(frame_output_name(&self.prefix, index)),
            )
        })
    }
}

/// Render and save every frame of `plan`.
///
/// Frames are processed strictly in order and the first failure aborts the
/// run, so nothing is written for later indices. Returns the written paths.
pub fn run_batch<F>(plan: &BatchPlan, mut render: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path) -> Result<Figure>,
{
    if !plan.input_dir.is_dir() {
        return Err(LucyError::MissingInput {
            path: plan.input_dir.clone(),
        });
    }

    let start = Instant::now();
    log_operation_start("batch", Some(plan.template.as_str()));

    let mut written = Vec::with_capacity(plan.indices.len());
    for (index, input, output) in plan.frames() {
        info!(
            index = index,
            file = %input.file_name().unwrap_or_default().to_string_lossy(),
            "Plotting frame"
        );

        let result = render(&input).and_then(|figure| figure.save(&output));
        if let Err(e) = result {
            log_operation_end("batch", start, false);
            return Err(e);
        }
        written.push(output);
    }

    log_operation_end("batch", start, true);
    info!(
        frames = written.len(),
        command = %animation_command(&plan.prefix, &plan.indices),
        "Combine the frames into an animation with"
    );

    Ok(written)
}
