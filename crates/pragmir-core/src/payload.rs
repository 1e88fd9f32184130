use serde::{Deserialize, Serialize};
use std::fmt;

/// Loop schedule kinds for `schedule` and `dist_schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ScheduleKind {
    Static = 0,
    Dynamic = 1,
    Guided = 2,
    Auto = 3,
    Runtime = 4,
}

impl ScheduleKind {
    pub fn from_keyword(word: &str) -> Option<ScheduleKind> {
        match word.to_ascii_lowercase().as_str() {
            "static" => Some(ScheduleKind::Static),
            "dynamic" => Some(ScheduleKind::Dynamic),
            "guided" => Some(ScheduleKind::Guided),
            "auto" => Some(ScheduleKind::Auto),
            "runtime" => Some(ScheduleKind::Runtime),
            _ => None,
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleKind::Static => write!(f, "static"),
            ScheduleKind::Dynamic => write!(f, "dynamic"),
            ScheduleKind::Guided => write!(f, "guided"),
            ScheduleKind::Auto => write!(f, "auto"),
            ScheduleKind::Runtime => write!(f, "runtime"),
        }
    }
}

/// Data-sharing defaults. `Present` is the OpenACC addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum DefaultKind {
    Shared = 0,
    None = 1,
    Private = 2,
    Firstprivate = 3,
    Present = 4,
}

impl DefaultKind {
    pub fn from_keyword(word: &str) -> Option<DefaultKind> {
        match word.to_ascii_lowercase().as_str() {
            "shared" => Some(DefaultKind::Shared),
            "none" => Some(DefaultKind::None),
            "private" => Some(DefaultKind::Private),
            "firstprivate" => Some(DefaultKind::Firstprivate),
            "present" => Some(DefaultKind::Present),
            _ => None,
        }
    }
}

impl fmt::Display for DefaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultKind::Shared => write!(f, "shared"),
            DefaultKind::None => write!(f, "none"),
            DefaultKind::Private => write!(f, "private"),
            DefaultKind::Firstprivate => write!(f, "firstprivate"),
            DefaultKind::Present => write!(f, "present"),
        }
    }
}

/// Thread affinity policies for `proc_bind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ProcBindKind {
    Master = 0,
    Close = 1,
    Spread = 2,
    Primary = 3,
}

impl ProcBindKind {
    pub fn from_keyword(word: &str) -> Option<ProcBindKind> {
        match word.to_ascii_lowercase().as_str() {
            "master" => Some(ProcBindKind::Master),
            "close" => Some(ProcBindKind::Close),
            "spread" => Some(ProcBindKind::Spread),
            "primary" => Some(ProcBindKind::Primary),
            _ => None,
        }
    }
}

impl fmt::Display for ProcBindKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcBindKind::Master => write!(f, "master"),
            ProcBindKind::Close => write!(f, "close"),
            ProcBindKind::Spread => write!(f, "spread"),
            ProcBindKind::Primary => write!(f, "primary"),
        }
    }
}

/// Memory orderings for `atomic_default_mem_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum MemoryOrderKind {
    SeqCst = 0,
    AcqRel = 1,
    Release = 2,
    Acquire = 3,
    Relaxed = 4,
}

impl MemoryOrderKind {
    pub fn from_keyword(word: &str) -> Option<MemoryOrderKind> {
        match word.to_ascii_lowercase().as_str() {
            "seq_cst" => Some(MemoryOrderKind::SeqCst),
            "acq_rel" => Some(MemoryOrderKind::AcqRel),
            "release" => Some(MemoryOrderKind::Release),
            "acquire" => Some(MemoryOrderKind::Acquire),
            "relaxed" => Some(MemoryOrderKind::Relaxed),
            _ => None,
        }
    }
}

impl fmt::Display for MemoryOrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryOrderKind::SeqCst => write!(f, "seq_cst"),
            MemoryOrderKind::AcqRel => write!(f, "acq_rel"),
            MemoryOrderKind::Release => write!(f, "release"),
            MemoryOrderKind::Acquire => write!(f, "acquire"),
            MemoryOrderKind::Relaxed => write!(f, "relaxed"),
        }
    }
}

/// Reduction operators; user-defined identifiers use `Custom` with the
/// identifier stored alongside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ReductionOperator {
    Add = 0,
    Multiply = 1,
    Subtract = 2,
    BitwiseAnd = 10,
    BitwiseOr = 11,
    BitwiseXor = 12,
    LogicalAnd = 20,
    LogicalOr = 21,
    Min = 30,
    Max = 31,
    Custom = 100,
}

impl ReductionOperator {
    pub fn from_token(token: &str) -> Option<ReductionOperator> {
        match token {
            "+" => Some(ReductionOperator::Add),
            "*" => Some(ReductionOperator::Multiply),
            "-" => Some(ReductionOperator::Subtract),
            "&" => Some(ReductionOperator::BitwiseAnd),
            "|" => Some(ReductionOperator::BitwiseOr),
            "^" => Some(ReductionOperator::BitwiseXor),
            "&&" => Some(ReductionOperator::LogicalAnd),
            "||" => Some(ReductionOperator::LogicalOr),
            _ => match token.to_ascii_lowercase().as_str() {
                "min" => Some(ReductionOperator::Min),
                "max" => Some(ReductionOperator::Max),
                _ => None,
            },
        }
    }
}

impl fmt::Display for ReductionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReductionOperator::Add => write!(f, "+"),
            ReductionOperator::Multiply => write!(f, "*"),
            ReductionOperator::Subtract => write!(f, "-"),
            ReductionOperator::BitwiseAnd => write!(f, "&"),
            ReductionOperator::BitwiseOr => write!(f, "|"),
            ReductionOperator::BitwiseXor => write!(f, "^"),
            ReductionOperator::LogicalAnd => write!(f, "&&"),
            ReductionOperator::LogicalOr => write!(f, "||"),
            ReductionOperator::Min => write!(f, "min"),
            ReductionOperator::Max => write!(f, "max"),
            ReductionOperator::Custom => write!(f, "custom"),
        }
    }
}

/// Variant-specific clause data. Expression bodies are opaque token runs;
/// nothing here evaluates host-language expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClausePayload {
    Bare,
    Expression(String),
    Items(Vec<String>),
    Schedule {
        kind: ScheduleKind,
        chunk: Option<String>,
    },
    Default(DefaultKind),
    ProcBind(ProcBindKind),
    MemoryOrder(MemoryOrderKind),
    Reduction {
        op: ReductionOperator,
        identifier: Option<String>,
        items: Vec<String>,
    },
    Wait {
        devnum: Option<String>,
        queues: bool,
        items: Vec<String>,
    },
}

impl ClausePayload {
    pub fn variant(&self) -> ClauseVariant {
        match self {
            ClausePayload::Bare => ClauseVariant::Bare,
            ClausePayload::Expression(_) => ClauseVariant::Expression,
            ClausePayload::Items(_) => ClauseVariant::List,
            ClausePayload::Schedule { .. }
            | ClausePayload::Default(_)
            | ClausePayload::ProcBind(_)
            | ClausePayload::MemoryOrder(_)
            | ClausePayload::Reduction { .. } => ClauseVariant::Enumerated,
            ClausePayload::Wait { .. } => ClauseVariant::Composite,
        }
    }
}

/// The five payload shapes a clause can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ClauseVariant {
    Bare = 0,
    Expression = 1,
    List = 2,
    Enumerated = 3,
    Composite = 4,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_kind_keywords() {
        assert_eq!(ScheduleKind::from_keyword("static"), Some(ScheduleKind::Static));
        assert_eq!(ScheduleKind::from_keyword("DYNAMIC"), Some(ScheduleKind::Dynamic));
        assert_eq!(ScheduleKind::from_keyword("sometimes"), None);
    }

    #[test]
    fn test_reduction_operator_tokens() {
        assert_eq!(ReductionOperator::from_token("+"), Some(ReductionOperator::Add));
        assert_eq!(ReductionOperator::from_token("&&"), Some(ReductionOperator::LogicalAnd));
        assert_eq!(ReductionOperator::from_token("MAX"), Some(ReductionOperator::Max));
        assert_eq!(ReductionOperator::from_token("my_op"), None);
    }

    #[test]
    fn test_payload_variants() {
        assert_eq!(ClausePayload::Bare.variant(), ClauseVariant::Bare);
        assert_eq!(
            ClausePayload::Expression("4".into()).variant(),
            ClauseVariant::Expression
        );
        assert_eq!(
            ClausePayload::Items(vec!["x".into()]).variant(),
            ClauseVariant::List
        );
        assert_eq!(
            ClausePayload::Default(DefaultKind::None).variant(),
            ClauseVariant::Enumerated
        );
        assert_eq!(
            ClausePayload::Wait {
                devnum: None,
                queues: false,
                items: vec!["1".into()]
            }
            .variant(),
            ClauseVariant::Composite
        );
    }

    #[test]
    fn test_display_is_lowercase_canonical() {
        assert_eq!(MemoryOrderKind::SeqCst.to_string(), "seq_cst");
        assert_eq!(DefaultKind::Firstprivate.to_string(), "firstprivate");
        assert_eq!(ProcBindKind::Primary.to_string(), "primary");
    }
}
