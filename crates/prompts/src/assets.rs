//! Plain-language descriptions of visual aids already shown to the user.

use std::fmt::Write;

use trellis_core::visual::VisualAsset;

/// Describe the visual aids attached to a node, one line per asset, in
/// input order. Returns an empty string when there is nothing to describe.
///
/// Unsupported kinds are skipped.
pub fn describe_visual_assets(assets: Option<&[VisualAsset]>) -> String {
    let Some(assets) = assets.filter(|a| !a.is_empty()) else {
        return String::new();
    };

    let mut description = String::from("The user was also shown the following visual aid(s):\n");
    for asset in assets {
        // Writing into a String cannot fail.
        let _ = match asset {
            VisualAsset::HybridTimeline { data, title } => {
                let names: Vec<&str> = data.iter().map(|item| item.name()).collect();
                writeln!(
                    description,
                    "- A timeline titled \"{}\" featuring: {}.",
                    title.as_deref().unwrap_or("Timeline"),
                    names.join(", ")
                )
            }
            VisualAsset::ImplicitPlotter { data } => {
                writeln!(description, "- A graph displaying the equation(s): {data}.")
            }
            VisualAsset::BarChart { data } => {
                writeln!(description, "- A bar chart with the data:\n{data}")
            }
            VisualAsset::PieChart { data } => {
                writeln!(description, "- A pie chart with the data:\n{data}")
            }
            VisualAsset::Unsupported => Ok(()),
        };
    }
    description
}
