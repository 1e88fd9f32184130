use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical clause kinds across both dialects.
///
/// One closed enumeration covers OpenMP and OpenACC; surface spellings that
/// differ only by alias (`pcopy`, `present_or_copy`, `dtype`, ...) normalize
/// onto these kinds at lookup time and the alias spelling is not retained.
/// Discriminants are grouped by argument rule and exposed through the C ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ClauseKind {
    // Bare clauses
    Nowait = 0,
    Untied = 1,
    Mergeable = 2,
    Inbranch = 3,
    Notinbranch = 4,
    Nogroup = 5,
    DynamicAllocators = 6,
    ReverseOffload = 7,
    UnifiedAddress = 8,
    UnifiedSharedMemory = 9,
    SeqCst = 10,
    AcqRel = 11,
    Release = 12,
    Acquire = 13,
    Relaxed = 14,
    Read = 15,
    Write = 16,
    Update = 17,
    Capture = 18,
    Compare = 19,
    Weak = 20,
    Full = 21,
    Auto = 22,
    Independent = 23,
    Seq = 24,
    Finalize = 25,
    IfPresent = 26,
    Nohost = 27,

    // Expression clauses
    If = 30,
    NumThreads = 31,
    NumTeams = 32,
    ThreadLimit = 33,
    Collapse = 34,
    Safelen = 35,
    Simdlen = 36,
    Priority = 37,
    Grainsize = 38,
    NumTasks = 39,
    Final = 40,
    Hint = 41,
    Device = 42,
    Filter = 43,
    Novariants = 44,
    Nocontext = 45,
    Defaultmap = 46,
    Order = 47,
    Bind = 48,
    Label = 49,
    Allocator = 50,
    Align = 51,
    Partial = 52,
    At = 53,
    Severity = 54,
    Message = 55,
    NumGangs = 56,
    NumWorkers = 57,
    VectorLength = 58,
    DeviceNum = 59,
    DefaultAsync = 60,

    // Bare-or-expression clauses
    Ordered = 70,
    Async = 71,
    Gang = 72,
    Worker = 73,
    Vector = 74,
    SelfClause = 75,

    // List clauses
    Private = 80,
    Firstprivate = 81,
    Lastprivate = 82,
    Shared = 83,
    Copyin = 84,
    Copyprivate = 85,
    Linear = 86,
    Aligned = 87,
    Map = 88,
    Depend = 89,
    Affinity = 90,
    Nontemporal = 91,
    Inclusive = 92,
    Exclusive = 93,
    Allocate = 94,
    UsesAllocators = 95,
    UseDevicePtr = 96,
    UseDeviceAddr = 97,
    IsDevicePtr = 98,
    HasDeviceAddr = 99,
    To = 100,
    From = 101,
    Link = 102,
    Enter = 103,
    Uniform = 104,
    Sizes = 105,
    Copy = 106,
    Copyout = 107,
    Create = 108,
    Delete = 109,
    Attach = 110,
    Detach = 111,
    Deviceptr = 112,
    DeviceResident = 113,
    Host = 114,
    NoCreate = 115,
    Present = 116,
    UseDevice = 117,
    Tile = 118,

    // Bare-or-list clauses
    DeviceType = 130,

    // Enumerated clauses
    Schedule = 140,
    DistSchedule = 141,
    Default = 142,
    ProcBind = 143,
    AtomicDefaultMemOrder = 144,
    Reduction = 145,
    InReduction = 146,
    TaskReduction = 147,

    // Composite clauses
    Wait = 150,
}

/// How a clause keyword's argument body is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseRule {
    /// No argument body; a paren body is malformed.
    Bare,
    /// Exactly one parenthesized opaque expression.
    Expression,
    /// Parenthesized comma-separated item list, optional leading modifier.
    List,
    /// Bare or a single parenthesized expression (`ordered` vs `ordered(2)`).
    OptionalExpression,
    /// Bare or a parenthesized list (`device_type(*)`).
    OptionalList,
    /// `schedule([modifiers:] kind[, chunk])`.
    Schedule,
    /// `default(shared|none|private|firstprivate|present)`.
    Default,
    /// `proc_bind(master|close|spread|primary)`.
    ProcBind,
    /// `atomic_default_mem_order(seq_cst|acq_rel|release|acquire|relaxed)`.
    MemoryOrder,
    /// `reduction([modifier,] op-or-id : list)`.
    Reduction,
    /// OpenACC `wait([devnum: n,] [queues:] int-list)`.
    Wait,
}

impl ClauseKind {
    pub const fn name(self) -> &'static str {
        match self {
            ClauseKind::Nowait => "nowait",
            ClauseKind::Untied => "untied",
            ClauseKind::Mergeable => "mergeable",
            ClauseKind::Inbranch => "inbranch",
            ClauseKind::Notinbranch => "notinbranch",
            ClauseKind::Nogroup => "nogroup",
            ClauseKind::DynamicAllocators => "dynamic_allocators",
            ClauseKind::ReverseOffload => "reverse_offload",
            ClauseKind::UnifiedAddress => "unified_address",
            ClauseKind::UnifiedSharedMemory => "unified_shared_memory",
            ClauseKind::SeqCst => "seq_cst",
            ClauseKind::AcqRel => "acq_rel",
            ClauseKind::Release => "release",
            ClauseKind::Acquire => "acquire",
            ClauseKind::Relaxed => "relaxed",
            ClauseKind::Read => "read",
            ClauseKind::Write => "write",
            ClauseKind::Update => "update",
            ClauseKind::Capture => "capture",
            ClauseKind::Compare => "compare",
            ClauseKind::Weak => "weak",
            ClauseKind::Full => "full",
            ClauseKind::Auto => "auto",
            ClauseKind::Independent => "independent",
            ClauseKind::Seq => "seq",
            ClauseKind::Finalize => "finalize",
            ClauseKind::IfPresent => "if_present",
            ClauseKind::Nohost => "nohost",
            ClauseKind::If => "if",
            ClauseKind::NumThreads => "num_threads",
            ClauseKind::NumTeams => "num_teams",
            ClauseKind::ThreadLimit => "thread_limit",
            ClauseKind::Collapse => "collapse",
            ClauseKind::Safelen => "safelen",
            ClauseKind::Simdlen => "simdlen",
            ClauseKind::Priority => "priority",
            ClauseKind::Grainsize => "grainsize",
            ClauseKind::NumTasks => "num_tasks",
            ClauseKind::Final => "final",
            ClauseKind::Hint => "hint",
            ClauseKind::Device => "device",
            ClauseKind::Filter => "filter",
            ClauseKind::Novariants => "novariants",
            ClauseKind::Nocontext => "nocontext",
            ClauseKind::Defaultmap => "defaultmap",
            ClauseKind::Order => "order",
            ClauseKind::Bind => "bind",
            ClauseKind::Label => "label",
            ClauseKind::Allocator => "allocator",
            ClauseKind::Align => "align",
            ClauseKind::Partial => "partial",
            ClauseKind::At => "at",
            ClauseKind::Severity => "severity",
            ClauseKind::Message => "message",
            ClauseKind::NumGangs => "num_gangs",
            ClauseKind::NumWorkers => "num_workers",
            ClauseKind::VectorLength => "vector_length",
            ClauseKind::DeviceNum => "device_num",
            ClauseKind::DefaultAsync => "default_async",
            ClauseKind::Ordered => "ordered",
            ClauseKind::Async => "async",
            ClauseKind::Gang => "gang",
            ClauseKind::Worker => "worker",
            ClauseKind::Vector => "vector",
            ClauseKind::SelfClause => "self",
            ClauseKind::Private => "private",
            ClauseKind::Firstprivate => "firstprivate",
            ClauseKind::Lastprivate => "lastprivate",
            ClauseKind::Shared => "shared",
            ClauseKind::Copyin => "copyin",
            ClauseKind::Copyprivate => "copyprivate",
            ClauseKind::Linear => "linear",
            ClauseKind::Aligned => "aligned",
            ClauseKind::Map => "map",
            ClauseKind::Depend => "depend",
            ClauseKind::Affinity => "affinity",
            ClauseKind::Nontemporal => "nontemporal",
            ClauseKind::Inclusive => "inclusive",
            ClauseKind::Exclusive => "exclusive",
            ClauseKind::Allocate => "allocate",
            ClauseKind::UsesAllocators => "uses_allocators",
            ClauseKind::UseDevicePtr => "use_device_ptr",
            ClauseKind::UseDeviceAddr => "use_device_addr",
            ClauseKind::IsDevicePtr => "is_device_ptr",
            ClauseKind::HasDeviceAddr => "has_device_addr",
            ClauseKind::To => "to",
            ClauseKind::From => "from",
            ClauseKind::Link => "link",
            ClauseKind::Enter => "enter",
            ClauseKind::Uniform => "uniform",
            ClauseKind::Sizes => "sizes",
            ClauseKind::Copy => "copy",
            ClauseKind::Copyout => "copyout",
            ClauseKind::Create => "create",
            ClauseKind::Delete => "delete",
            ClauseKind::Attach => "attach",
            ClauseKind::Detach => "detach",
            ClauseKind::Deviceptr => "deviceptr",
            ClauseKind::DeviceResident => "device_resident",
            ClauseKind::Host => "host",
            ClauseKind::NoCreate => "no_create",
            ClauseKind::Present => "present",
            ClauseKind::UseDevice => "use_device",
            ClauseKind::Tile => "tile",
            ClauseKind::DeviceType => "device_type",
            ClauseKind::Schedule => "schedule",
            ClauseKind::DistSchedule => "dist_schedule",
            ClauseKind::Default => "default",
            ClauseKind::ProcBind => "proc_bind",
            ClauseKind::AtomicDefaultMemOrder => "atomic_default_mem_order",
            ClauseKind::Reduction => "reduction",
            ClauseKind::InReduction => "in_reduction",
            ClauseKind::TaskReduction => "task_reduction",
            ClauseKind::Wait => "wait",
        }
    }

    pub const fn rule(self) -> ClauseRule {
        match self {
            ClauseKind::Nowait
            | ClauseKind::Untied
            | ClauseKind::Mergeable
            | ClauseKind::Inbranch
            | ClauseKind::Notinbranch
            | ClauseKind::Nogroup
            | ClauseKind::DynamicAllocators
            | ClauseKind::ReverseOffload
            | ClauseKind::UnifiedAddress
            | ClauseKind::UnifiedSharedMemory
            | ClauseKind::SeqCst
            | ClauseKind::AcqRel
            | ClauseKind::Release
            | ClauseKind::Acquire
            | ClauseKind::Relaxed
            | ClauseKind::Read
            | ClauseKind::Write
            | ClauseKind::Update
            | ClauseKind::Capture
            | ClauseKind::Compare
            | ClauseKind::Weak
            | ClauseKind::Full
            | ClauseKind::Auto
            | ClauseKind::Independent
            | ClauseKind::Seq
            | ClauseKind::Finalize
            | ClauseKind::IfPresent
            | ClauseKind::Nohost => ClauseRule::Bare,

            ClauseKind::If
            | ClauseKind::NumThreads
            | ClauseKind::NumTeams
            | ClauseKind::ThreadLimit
            | ClauseKind::Collapse
            | ClauseKind::Safelen
            | ClauseKind::Simdlen
            | ClauseKind::Priority
            | ClauseKind::Grainsize
            | ClauseKind::NumTasks
            | ClauseKind::Final
            | ClauseKind::Hint
            | ClauseKind::Device
            | ClauseKind::Filter
            | ClauseKind::Novariants
            | ClauseKind::Nocontext
            | ClauseKind::Defaultmap
            | ClauseKind::Order
            | ClauseKind::Bind
            | ClauseKind::Label
            | ClauseKind::Allocator
            | ClauseKind::Align
            | ClauseKind::Partial
            | ClauseKind::At
            | ClauseKind::Severity
            | ClauseKind::Message
            | ClauseKind::NumGangs
            | ClauseKind::NumWorkers
            | ClauseKind::VectorLength
            | ClauseKind::DeviceNum
            | ClauseKind::DefaultAsync => ClauseRule::Expression,

            ClauseKind::Ordered
            | ClauseKind::Async
            | ClauseKind::Gang
            | ClauseKind::Worker
            | ClauseKind::Vector
            | ClauseKind::SelfClause => ClauseRule::OptionalExpression,

            ClauseKind::Private
            | ClauseKind::Firstprivate
            | ClauseKind::Lastprivate
            | ClauseKind::Shared
            | ClauseKind::Copyin
            | ClauseKind::Copyprivate
            | ClauseKind::Linear
            | ClauseKind::Aligned
            | ClauseKind::Map
            | ClauseKind::Depend
            | ClauseKind::Affinity
            | ClauseKind::Nontemporal
            | ClauseKind::Inclusive
            | ClauseKind::Exclusive
            | ClauseKind::Allocate
            | ClauseKind::UsesAllocators
            | ClauseKind::UseDevicePtr
            | ClauseKind::UseDeviceAddr
            | ClauseKind::IsDevicePtr
            | ClauseKind::HasDeviceAddr
            | ClauseKind::To
            | ClauseKind::From
            | ClauseKind::Link
            | ClauseKind::Enter
            | ClauseKind::Uniform
            | ClauseKind::Sizes
            | ClauseKind::Copy
            | ClauseKind::Copyout
            | ClauseKind::Create
            | ClauseKind::Delete
            | ClauseKind::Attach
            | ClauseKind::Detach
            | ClauseKind::Deviceptr
            | ClauseKind::DeviceResident
            | ClauseKind::Host
            | ClauseKind::NoCreate
            | ClauseKind::Present
            | ClauseKind::UseDevice
            | ClauseKind::Tile => ClauseRule::List,

            ClauseKind::DeviceType => ClauseRule::OptionalList,

            ClauseKind::Schedule | ClauseKind::DistSchedule => ClauseRule::Schedule,
            ClauseKind::Default => ClauseRule::Default,
            ClauseKind::ProcBind => ClauseRule::ProcBind,
            ClauseKind::AtomicDefaultMemOrder => ClauseRule::MemoryOrder,
            ClauseKind::Reduction | ClauseKind::InReduction | ClauseKind::TaskReduction => {
                ClauseRule::Reduction
            }
            ClauseKind::Wait => ClauseRule::Wait,
        }
    }

    pub const ALL: &'static [ClauseKind] = &[
        ClauseKind::Nowait,
        ClauseKind::Untied,
        ClauseKind::Mergeable,
        ClauseKind::Inbranch,
        ClauseKind::Notinbranch,
        ClauseKind::Nogroup,
        ClauseKind::DynamicAllocators,
        ClauseKind::ReverseOffload,
        ClauseKind::UnifiedAddress,
        ClauseKind::UnifiedSharedMemory,
        ClauseKind::SeqCst,
        ClauseKind::AcqRel,
        ClauseKind::Release,
        ClauseKind::Acquire,
        ClauseKind::Relaxed,
        ClauseKind::Read,
        ClauseKind::Write,
        ClauseKind::Update,
        ClauseKind::Capture,
        ClauseKind::Compare,
        ClauseKind::Weak,
        ClauseKind::Full,
        ClauseKind::Auto,
        ClauseKind::Independent,
        ClauseKind::Seq,
        ClauseKind::Finalize,
        ClauseKind::IfPresent,
        ClauseKind::Nohost,
        ClauseKind::If,
        ClauseKind::NumThreads,
        ClauseKind::NumTeams,
        ClauseKind::ThreadLimit,
        ClauseKind::Collapse,
        ClauseKind::Safelen,
        ClauseKind::Simdlen,
        ClauseKind::Priority,
        ClauseKind::Grainsize,
        ClauseKind::NumTasks,
        ClauseKind::Final,
        ClauseKind::Hint,
        ClauseKind::Device,
        ClauseKind::Filter,
        ClauseKind::Novariants,
        ClauseKind::Nocontext,
        ClauseKind::Defaultmap,
        ClauseKind::Order,
        ClauseKind::Bind,
        ClauseKind::Label,
        ClauseKind::Allocator,
        ClauseKind::Align,
        ClauseKind::Partial,
        ClauseKind::At,
        ClauseKind::Severity,
        ClauseKind::Message,
        ClauseKind::NumGangs,
        ClauseKind::NumWorkers,
        ClauseKind::VectorLength,
        ClauseKind::DeviceNum,
        ClauseKind::DefaultAsync,
        ClauseKind::Ordered,
        ClauseKind::Async,
        ClauseKind::Gang,
        ClauseKind::Worker,
        ClauseKind::Vector,
        ClauseKind::SelfClause,
        ClauseKind::Private,
        ClauseKind::Firstprivate,
        ClauseKind::Lastprivate,
        ClauseKind::Shared,
        ClauseKind::Copyin,
        ClauseKind::Copyprivate,
        ClauseKind::Linear,
        ClauseKind::Aligned,
        ClauseKind::Map,
        ClauseKind::Depend,
        ClauseKind::Affinity,
        ClauseKind::Nontemporal,
        ClauseKind::Inclusive,
        ClauseKind::Exclusive,
        ClauseKind::Allocate,
        ClauseKind::UsesAllocators,
        ClauseKind::UseDevicePtr,
        ClauseKind::UseDeviceAddr,
        ClauseKind::IsDevicePtr,
        ClauseKind::HasDeviceAddr,
        ClauseKind::To,
        ClauseKind::From,
        ClauseKind::Link,
        ClauseKind::Enter,
        ClauseKind::Uniform,
        ClauseKind::Sizes,
        ClauseKind::Copy,
        ClauseKind::Copyout,
        ClauseKind::Create,
        ClauseKind::Delete,
        ClauseKind::Attach,
        ClauseKind::Detach,
        ClauseKind::Deviceptr,
        ClauseKind::DeviceResident,
        ClauseKind::Host,
        ClauseKind::NoCreate,
        ClauseKind::Present,
        ClauseKind::UseDevice,
        ClauseKind::Tile,
        ClauseKind::DeviceType,
        ClauseKind::Schedule,
        ClauseKind::DistSchedule,
        ClauseKind::Default,
        ClauseKind::ProcBind,
        ClauseKind::AtomicDefaultMemOrder,
        ClauseKind::Reduction,
        ClauseKind::InReduction,
        ClauseKind::TaskReduction,
        ClauseKind::Wait,
    ];
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Surface spellings that normalize onto another canonical kind.
const CLAUSE_ALIASES: &[(&str, ClauseKind)] = &[
    ("pcopy", ClauseKind::Copy),
    ("present_or_copy", ClauseKind::Copy),
    ("pcopyin", ClauseKind::Copyin),
    ("present_or_copyin", ClauseKind::Copyin),
    ("pcopyout", ClauseKind::Copyout),
    ("present_or_copyout", ClauseKind::Copyout),
    ("pcreate", ClauseKind::Create),
    ("present_or_create", ClauseKind::Create),
    ("dtype", ClauseKind::DeviceType),
];

static CLAUSE_LOOKUP: Lazy<HashMap<&'static str, ClauseKind>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for kind in ClauseKind::ALL {
        table.insert(kind.name(), *kind);
    }
    for (alias, kind) in CLAUSE_ALIASES {
        table.insert(*alias, *kind);
    }
    table
});

/// Resolve a surface clause keyword to its canonical kind, case-insensitively.
pub fn lookup_clause(keyword: &str) -> Option<ClauseKind> {
    let lowered = keyword.to_ascii_lowercase();
    CLAUSE_LOOKUP.get(lowered.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup_clause("PRIVATE"), Some(ClauseKind::Private));
        assert_eq!(lookup_clause("NuM_ThReAdS"), Some(ClauseKind::NumThreads));
        assert_eq!(lookup_clause("no_such_clause"), None);
    }

    #[test]
    fn test_aliases_normalize() {
        assert_eq!(lookup_clause("pcopy"), Some(ClauseKind::Copy));
        assert_eq!(lookup_clause("present_or_copy"), Some(ClauseKind::Copy));
        assert_eq!(lookup_clause("pcopyin"), Some(ClauseKind::Copyin));
        assert_eq!(lookup_clause("present_or_copyin"), Some(ClauseKind::Copyin));
        assert_eq!(lookup_clause("pcopyout"), Some(ClauseKind::Copyout));
        assert_eq!(lookup_clause("present_or_copyout"), Some(ClauseKind::Copyout));
        assert_eq!(lookup_clause("pcreate"), Some(ClauseKind::Create));
        assert_eq!(lookup_clause("present_or_create"), Some(ClauseKind::Create));
        assert_eq!(lookup_clause("dtype"), Some(ClauseKind::DeviceType));
    }

    #[test]
    fn test_every_kind_resolves_to_itself() {
        for kind in ClauseKind::ALL {
            assert_eq!(lookup_clause(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn test_rules_match_grouping() {
        assert_eq!(ClauseKind::Nowait.rule(), ClauseRule::Bare);
        assert_eq!(ClauseKind::NumThreads.rule(), ClauseRule::Expression);
        assert_eq!(ClauseKind::Private.rule(), ClauseRule::List);
        assert_eq!(ClauseKind::Ordered.rule(), ClauseRule::OptionalExpression);
        assert_eq!(ClauseKind::DeviceType.rule(), ClauseRule::OptionalList);
        assert_eq!(ClauseKind::Schedule.rule(), ClauseRule::Schedule);
        assert_eq!(ClauseKind::Reduction.rule(), ClauseRule::Reduction);
        assert_eq!(ClauseKind::Wait.rule(), ClauseRule::Wait);
    }
}
