//! SVG flamegraph generation using inferno.
//!
//! Collapsed stacks (one line per unique full stack, weighted by the CPU
//! time observed under it) are handed to `inferno::flamegraph`.

use crate::aggregator::stack_builder::CollapsedStack;
use crate::utils::error::FlamegraphError;
use log::info;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,

    /// Label for sample weights in tooltips (e.g. "clock_ticks")
    pub count_name: String,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "CPU Profile".to_string(),
            width: 1200,
            count_name: "ticks".to_string(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_count_name(mut self, count_name: impl Into<String>) -> Self {
        self.count_name = count_name.into();
        self
    }
}

/// Generate SVG flamegraph from collapsed stacks
///
/// **Public** - main entry point for flamegraph rendering
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - nothing was attributed
/// * `FlamegraphError::GenerationFailed` - inferno rejected the input
pub fn generate_flamegraph(
    stacks: &[CollapsedStack],
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if stacks.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph with {} stacks", stacks.len());

    let lines: Vec<String> = stacks.iter().map(CollapsedStack::to_line).collect();

    let mut options = inferno::flamegraph::Options::default();
    options.title = config.title.clone();
    options.count_name = config.count_name.clone();
    options.image_width = Some(config.width);

    let mut svg_output = Vec::new();
    inferno::flamegraph::from_lines(
        &mut options,
        lines.iter().map(|s| s.as_str()),
        &mut svg_output,
    )
    .map_err(|e| FlamegraphError::GenerationFailed(e.to_string()))?;

    let svg = String::from_utf8(svg_output)
        .map_err(|e| FlamegraphError::GenerationFailed(e.to_string()))?;

    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stacks_rejected() {
        assert!(matches!(
            generate_flamegraph(&[], None),
            Err(FlamegraphError::EmptyStacks)
        ));
    }

    #[test]
    fn test_generate_flamegraph_contains_frames() {
        let stacks = vec![
            CollapsedStack::new("main;poll;read".to_string(), 30),
            CollapsedStack::new("main;hash".to_string(), 10),
        ];
        let config = FlamegraphConfig::new().with_title("Test Profile");

        let svg = generate_flamegraph(&stacks, Some(&config)).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Test Profile"));
        assert!(svg.contains("poll"));
    }
}
