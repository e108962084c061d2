//! `trellis prompt`: render a task prompt from a journey outline file.
//!
//! The outline is the nested JSON the frontend keeps:
//! `{ "id", "fullTitle", "content"?, "children": [...] }`.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use trellis_core::journey::{Journey, NodeOutline};
use trellis_prompts::{PromptContext, strip_markup, templates};

/// Categories offered to the syllabus prompt when none are given.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "History",
    "Science",
    "Mathematics",
    "Economics",
    "Arts",
    "Technology",
    "Philosophy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptKind {
    /// Continue the current node's paragraphs ("Tell me more")
    InPlace,
    /// Explain the current node
    Standard,
    /// Explain the current node, science/maths/economics persona
    Stem,
    /// Background generation of the current node
    Prefetch,
    /// Break a question into 3-7 follow-up areas
    Subtopics,
    /// Explain one timeline entry
    Timeline,
    /// Design a syllabus for a new topic
    Syllabus,
    /// Let the model choose between explanation and subtopics
    Dispatch,
    /// Chart.js code for a chart request
    Chart,
}

#[derive(Debug, Default, clap::Args)]
pub struct PromptArgs {
    /// Journey outline JSON file
    #[arg(long)]
    pub journey: Option<PathBuf>,

    /// Id of the current node (defaults to the root)
    #[arg(long)]
    pub current: Option<String>,

    /// Topic title (defaults to the root node's title)
    #[arg(long)]
    pub topic: Option<String>,

    /// Audience level, e.g. "beginner"
    #[arg(long, default_value = "beginner")]
    pub level: String,

    /// Free text: paragraphs to continue, the user's question, or the chart request
    #[arg(long)]
    pub text: Option<String>,

    /// Clause appended after the node title by `standard` and `prefetch`
    #[arg(long, default_value = "")]
    pub context: String,

    /// Timeline entry the user clicked
    #[arg(long)]
    pub event: Option<String>,

    /// Other timeline entries, comma separated
    #[arg(long, value_delimiter = ',')]
    pub others: Vec<String>,

    /// The current node already shows subtopic cards
    #[arg(long)]
    pub has_cards: bool,

    /// Syllabus categories, comma separated
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,
}

pub fn run(kind: PromptKind, args: PromptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = render(kind, &args)?;
    println!("{prompt}");
    Ok(())
}

/// Build the prompt text for `kind`.
pub fn render(kind: PromptKind, args: &PromptArgs) -> Result<String, Box<dyn std::error::Error>> {
    let prompt = match kind {
        PromptKind::Chart => templates::chart_code(required(&args.text, "--text <chart request>")?),
        PromptKind::Syllabus => {
            let topic = required(&args.topic, "--topic")?;
            if args.categories.is_empty() {
                templates::syllabus(topic, &args.level, DEFAULT_CATEGORIES)
            } else {
                templates::syllabus(topic, &args.level, args.categories.as_slice())
            }
        }
        PromptKind::InPlace => {
            let node = NodeContext::load(args)?;
            let existing = match (&args.text, node.overview) {
                (Some(text), _) => text.clone(),
                (None, Some(overview)) => overview,
                (None, None) => return Err("the current node has no content; pass --text".into()),
            };
            templates::in_place_elaboration(&node.ctx, &existing)
        }
        PromptKind::Standard => {
            templates::standard_elaboration(&NodeContext::load(args)?.ctx, &args.context)
        }
        PromptKind::Stem => templates::stem_elaboration(&NodeContext::load(args)?.ctx),
        PromptKind::Prefetch => {
            templates::prefetch_elaboration(&NodeContext::load(args)?.ctx, &args.context)
        }
        PromptKind::Subtopics => {
            let question = required(&args.text, "--text <question>")?;
            templates::new_subtopics(&NodeContext::load(args)?.ctx, question)
        }
        PromptKind::Timeline => {
            let event = required(&args.event, "--event")?;
            let node = NodeContext::load(args)?;
            templates::timeline_elaboration(&node.ctx, &node.topic, event, &args.others.join(", "))
        }
        PromptKind::Dispatch => {
            let question = required(&args.text, "--text <question>")?;
            templates::question_dispatcher(&NodeContext::load(args)?.ctx, question, args.has_cards)
        }
    };

    Ok(prompt)
}

/// Everything a journey-aware prompt needs about the current node.
struct NodeContext {
    ctx: PromptContext,
    topic: String,
    /// The node's overview as plain text, if it has content.
    overview: Option<String>,
}

impl NodeContext {
    fn load(args: &PromptArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let path = args
            .journey
            .as_deref()
            .ok_or("this prompt needs --journey <file.json>")?;
        let journey = load_journey(path)?;

        let current_key = match args.current.as_deref() {
            Some(id) => journey.require(id)?,
            None => journey.root(),
        };
        let current = journey
            .get(current_key)
            .ok_or("current node is missing from the journey")?;
        let topic = match &args.topic {
            Some(topic) => topic.clone(),
            None => journey
                .get(journey.root())
                .map(|n| n.full_title().to_string())
                .unwrap_or_default(),
        };

        let ctx = PromptContext::for_node(&journey, topic.as_str(), args.level.as_str(), current.id())?;
        Ok(Self {
            ctx,
            topic,
            overview: current.content().map(|c| strip_markup(&c.overview)),
        })
    }
}

fn required<'a>(value: &'a Option<String>, flag: &str) -> Result<&'a str, String> {
    value
        .as_deref()
        .ok_or_else(|| format!("this prompt needs {flag}"))
}

fn load_journey(path: &Path) -> Result<Journey, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let outline: NodeOutline = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    Ok(Journey::from_outline(&outline)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTLINE: &str = r#"{
        "id": "alg",
        "fullTitle": "Algebra",
        "children": [
            {
                "id": "lin",
                "fullTitle": "Linear Equations",
                "content": {
                    "overview": "<p>Lines...</p>",
                    "definitions": [{ "term": "slope", "definition": "rate of change" }]
                },
                "children": []
            }
        ]
    }"#;

    fn journey_file() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), OUTLINE).unwrap();
        file
    }

    fn args_for(file: &tempfile::NamedTempFile) -> PromptArgs {
        PromptArgs {
            journey: Some(file.path().to_path_buf()),
            current: Some("lin".into()),
            level: "beginner".into(),
            ..PromptArgs::default()
        }
    }

    #[test]
    fn standard_prompt_from_outline() {
        let file = journey_file();
        let prompt = render(PromptKind::Standard, &args_for(&file)).unwrap();
        assert!(prompt.contains("learning about the topic of \"Algebra\" at a \"beginner\" level"));
        assert!(prompt.contains("- Algebra\n  - Linear Equations <-- (You are here)\n"));
        assert!(prompt.contains("--- Content for: \"Linear Equations\" ---\nLines...\n"));
        assert!(prompt.contains("explain the topic \"Linear Equations\", with 2-3 paragraphs."));
    }

    #[test]
    fn in_place_defaults_to_node_overview() {
        let file = journey_file();
        let prompt = render(PromptKind::InPlace, &args_for(&file)).unwrap();
        assert!(prompt.contains("--- EXISTING PARAGRAPHS ---\nLines...\n--- END EXISTING PARAGRAPHS ---"));
    }

    #[test]
    fn in_place_without_content_needs_text() {
        let file = journey_file();
        let mut args = args_for(&file);
        args.current = Some("alg".into());
        assert!(render(PromptKind::InPlace, &args).is_err());
    }

    #[test]
    fn timeline_joins_other_events() {
        let file = journey_file();
        let mut args = args_for(&file);
        args.event = Some("Al-Khwarizmi's treatise".into());
        args.others = vec!["Diophantus".into(), "Viete".into()];
        let prompt = render(PromptKind::Timeline, &args).unwrap();
        assert!(prompt.contains("other related events on the timeline include: Diophantus, Viete."));
    }

    #[test]
    fn dispatch_honours_has_cards() {
        let file = journey_file();
        let mut args = args_for(&file);
        args.text = Some("What about quadratics?".into());
        let without = render(PromptKind::Dispatch, &args).unwrap();
        args.has_cards = true;
        let with = render(PromptKind::Dispatch, &args).unwrap();
        assert!(without.contains("\"newNode\": Choose this"));
        assert!(!with.contains("\"newNode\": Choose this"));
    }

    #[test]
    fn syllabus_and_chart_need_no_journey() {
        let args = PromptArgs {
            topic: Some("Chinese diplomacy".into()),
            level: "expert".into(),
            ..PromptArgs::default()
        };
        let syllabus = render(PromptKind::Syllabus, &args).unwrap();
        assert!(syllabus.contains("categories: History, Science, Mathematics, Economics"));

        let args = PromptArgs {
            text: Some("a sine wave".into()),
            ..PromptArgs::default()
        };
        assert!(render(PromptKind::Chart, &args).unwrap().contains("USER'S REQUEST: \"a sine wave\""));
    }

    #[test]
    fn missing_inputs_are_errors() {
        assert!(render(PromptKind::Standard, &PromptArgs::default()).is_err());
        assert!(render(PromptKind::Syllabus, &PromptArgs::default()).is_err());

        let file = journey_file();
        let mut args = args_for(&file);
        args.current = Some("nope".into());
        let err = render(PromptKind::Stem, &args).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
