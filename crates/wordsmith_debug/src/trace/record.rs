//! Trace event and record types.

use std::fmt;

use wordsmith_foundation::RuleId;

/// Something that happened while compiling a grammar or deriving a word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A grammar finished compiling.
    GrammarLoaded {
        /// Where the grammar came from.
        source: String,
        /// Number of declared rules.
        rules: usize,
        /// Number of transformations.
        transformations: usize,
    },

    /// A rule was expanded.
    RuleCompiled {
        /// The rule.
        rule: RuleId,
        /// How many literal alternatives it expanded to.
        alternatives: usize,
    },

    /// A transformation's pattern was expanded into a regex.
    TransformationCompiled {
        /// Zero-based position in the morphology list.
        index: usize,
        /// The expanded regex source.
        expanded: String,
    },

    /// A transformation changed a word.
    MorphologyStep {
        /// Zero-based position of the transformation.
        index: usize,
        /// The word before.
        before: String,
        /// The word after.
        after: String,
    },

    /// A word was produced.
    WordGenerated {
        /// The final word.
        word: String,
    },
}

impl TraceEvent {
    /// Returns the kebab-case name of this event type.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::GrammarLoaded { .. } => "grammar-loaded",
            Self::RuleCompiled { .. } => "rule-compiled",
            Self::TransformationCompiled { .. } => "transformation-compiled",
            Self::MorphologyStep { .. } => "morphology-step",
            Self::WordGenerated { .. } => "word-generated",
        }
    }

    /// Returns true for events raised during compilation.
    #[must_use]
    pub const fn is_compile_event(&self) -> bool {
        matches!(
            self,
            Self::GrammarLoaded { .. } | Self::RuleCompiled { .. } | Self::TransformationCompiled { .. }
        )
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrammarLoaded {
                source,
                rules,
                transformations,
            } => write!(
                f,
                "loaded {source}: {rules} rules, {transformations} transformations"
            ),
            Self::RuleCompiled { rule, alternatives } => {
                write!(f, "compiled {rule} ({alternatives} alternatives)")
            }
            Self::TransformationCompiled { index, expanded } => {
                write!(f, "compiled transformation #{} /{expanded}/", index + 1)
            }
            Self::MorphologyStep {
                index,
                before,
                after,
            } => write!(f, "#{}: {before} => {after}", index + 1),
            Self::WordGenerated { word } => write!(f, "word {word:?}"),
        }
    }
}

/// A recorded event with its position in the trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Monotonically increasing record id.
    pub id: u64,
    /// Sequence number of the word being derived (0 while compiling).
    pub word: u64,
    /// Nanoseconds since the tracer started.
    pub timestamp_ns: u64,
    /// The event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(id: u64, word: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            word,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}
