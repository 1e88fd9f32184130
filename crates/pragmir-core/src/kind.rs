use crate::lang::Dialect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// OpenMP directive kinds, combined constructs included.
///
/// Discriminants are grouped by construct family and exposed through the C
/// ABI, so they are explicit and never renumbered. The internal loop kind is
/// `For`; Fortran `do` maps onto it at parse time and back at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum OmpDirectiveKind {
    // Parallel constructs
    Parallel = 0,
    ParallelFor = 1,
    ParallelForSimd = 2,
    ParallelSections = 3,
    ParallelWorkshare = 4,
    ParallelLoop = 5,
    ParallelMasked = 6,
    ParallelMaster = 7,
    ParallelMaskedTaskloop = 8,
    ParallelMaskedTaskloopSimd = 9,
    ParallelMasterTaskloop = 10,
    ParallelMasterTaskloopSimd = 11,

    // Work-sharing constructs
    For = 20,
    ForSimd = 21,
    Sections = 22,
    Section = 23,
    Single = 24,
    Workshare = 25,
    Loop = 26,
    Scope = 27,

    // SIMD
    Simd = 30,
    DeclareSimd = 31,

    // Tasking
    Task = 40,
    Taskloop = 41,
    TaskloopSimd = 42,
    Taskyield = 43,
    Taskwait = 44,
    Taskgroup = 45,

    // Masked / master
    Masked = 50,
    MaskedTaskloop = 51,
    MaskedTaskloopSimd = 52,
    Master = 53,
    MasterTaskloop = 54,
    MasterTaskloopSimd = 55,

    // Target constructs
    Target = 60,
    TargetData = 61,
    TargetEnterData = 62,
    TargetExitData = 63,
    TargetUpdate = 64,
    TargetParallel = 65,
    TargetParallelFor = 66,
    TargetParallelForSimd = 67,
    TargetParallelLoop = 68,
    TargetSimd = 69,
    TargetTeams = 70,
    TargetTeamsDistribute = 71,
    TargetTeamsDistributeSimd = 72,
    TargetTeamsDistributeParallelFor = 73,
    TargetTeamsDistributeParallelForSimd = 74,
    TargetTeamsLoop = 75,

    // Teams constructs
    Teams = 80,
    TeamsDistribute = 81,
    TeamsDistributeSimd = 82,
    TeamsDistributeParallelFor = 83,
    TeamsDistributeParallelForSimd = 84,
    TeamsLoop = 85,

    // Distribute constructs
    Distribute = 90,
    DistributeSimd = 91,
    DistributeParallelFor = 92,
    DistributeParallelForSimd = 93,

    // Synchronization
    Barrier = 100,
    Critical = 101,
    Atomic = 102,
    Flush = 103,
    Ordered = 104,
    Cancel = 105,
    CancellationPoint = 106,
    Depobj = 107,
    Scan = 108,
    CancelParallel = 109,
    CancelFor = 110,
    CancelSections = 111,
    CancelTaskgroup = 112,
    CancellationPointParallel = 113,
    CancellationPointFor = 114,
    CancellationPointSections = 115,
    CancellationPointTaskgroup = 116,

    // Declarative and utility
    Threadprivate = 120,
    DeclareReduction = 121,
    DeclareMapper = 122,
    DeclareTarget = 123,
    EndDeclareTarget = 124,
    DeclareVariant = 125,
    Requires = 126,
    Allocate = 127,
    Metadirective = 128,
    Dispatch = 129,
    Interop = 130,
    Nothing = 131,
    Error = 132,
    Tile = 133,
    Unroll = 134,
}

impl OmpDirectiveKind {
    pub const ALL: &'static [OmpDirectiveKind] = &[
        OmpDirectiveKind::Parallel,
        OmpDirectiveKind::ParallelFor,
        OmpDirectiveKind::ParallelForSimd,
        OmpDirectiveKind::ParallelSections,
        OmpDirectiveKind::ParallelWorkshare,
        OmpDirectiveKind::ParallelLoop,
        OmpDirectiveKind::ParallelMasked,
        OmpDirectiveKind::ParallelMaster,
        OmpDirectiveKind::ParallelMaskedTaskloop,
        OmpDirectiveKind::ParallelMaskedTaskloopSimd,
        OmpDirectiveKind::ParallelMasterTaskloop,
        OmpDirectiveKind::ParallelMasterTaskloopSimd,
        OmpDirectiveKind::For,
        OmpDirectiveKind::ForSimd,
        OmpDirectiveKind::Sections,
        OmpDirectiveKind::Section,
        OmpDirectiveKind::Single,
        OmpDirectiveKind::Workshare,
        OmpDirectiveKind::Loop,
        OmpDirectiveKind::Scope,
        OmpDirectiveKind::Simd,
        OmpDirectiveKind::DeclareSimd,
        OmpDirectiveKind::Task,
        OmpDirectiveKind::Taskloop,
        OmpDirectiveKind::TaskloopSimd,
        OmpDirectiveKind::Taskyield,
        OmpDirectiveKind::Taskwait,
        OmpDirectiveKind::Taskgroup,
        OmpDirectiveKind::Masked,
        OmpDirectiveKind::MaskedTaskloop,
        OmpDirectiveKind::MaskedTaskloopSimd,
        OmpDirectiveKind::Master,
        OmpDirectiveKind::MasterTaskloop,
        OmpDirectiveKind::MasterTaskloopSimd,
        OmpDirectiveKind::Target,
        OmpDirectiveKind::TargetData,
        OmpDirectiveKind::TargetEnterData,
        OmpDirectiveKind::TargetExitData,
        OmpDirectiveKind::TargetUpdate,
        OmpDirectiveKind::TargetParallel,
        OmpDirectiveKind::TargetParallelFor,
        OmpDirectiveKind::TargetParallelForSimd,
        OmpDirectiveKind::TargetParallelLoop,
        OmpDirectiveKind::TargetSimd,
        OmpDirectiveKind::TargetTeams,
        OmpDirectiveKind::TargetTeamsDistribute,
        OmpDirectiveKind::TargetTeamsDistributeSimd,
        OmpDirectiveKind::TargetTeamsDistributeParallelFor,
        OmpDirectiveKind::TargetTeamsDistributeParallelForSimd,
        OmpDirectiveKind::TargetTeamsLoop,
        OmpDirectiveKind::Teams,
        OmpDirectiveKind::TeamsDistribute,
        OmpDirectiveKind::TeamsDistributeSimd,
        OmpDirectiveKind::TeamsDistributeParallelFor,
        OmpDirectiveKind::TeamsDistributeParallelForSimd,
        OmpDirectiveKind::TeamsLoop,
        OmpDirectiveKind::Distribute,
        OmpDirectiveKind::DistributeSimd,
        OmpDirectiveKind::DistributeParallelFor,
        OmpDirectiveKind::DistributeParallelForSimd,
        OmpDirectiveKind::Barrier,
        OmpDirectiveKind::Critical,
        OmpDirectiveKind::Atomic,
        OmpDirectiveKind::Flush,
        OmpDirectiveKind::Ordered,
        OmpDirectiveKind::Cancel,
        OmpDirectiveKind::CancellationPoint,
        OmpDirectiveKind::Depobj,
        OmpDirectiveKind::Scan,
        OmpDirectiveKind::CancelParallel,
        OmpDirectiveKind::CancelFor,
        OmpDirectiveKind::CancelSections,
        OmpDirectiveKind::CancelTaskgroup,
        OmpDirectiveKind::CancellationPointParallel,
        OmpDirectiveKind::CancellationPointFor,
        OmpDirectiveKind::CancellationPointSections,
        OmpDirectiveKind::CancellationPointTaskgroup,
        OmpDirectiveKind::Threadprivate,
        OmpDirectiveKind::DeclareReduction,
        OmpDirectiveKind::DeclareMapper,
        OmpDirectiveKind::DeclareTarget,
        OmpDirectiveKind::EndDeclareTarget,
        OmpDirectiveKind::DeclareVariant,
        OmpDirectiveKind::Requires,
        OmpDirectiveKind::Allocate,
        OmpDirectiveKind::Metadirective,
        OmpDirectiveKind::Dispatch,
        OmpDirectiveKind::Interop,
        OmpDirectiveKind::Nothing,
        OmpDirectiveKind::Error,
        OmpDirectiveKind::Tile,
        OmpDirectiveKind::Unroll,
    ];

    /// Canonical C-family keyword sequence, space separated.
    pub const fn name(self) -> &'static str {
        match self {
            OmpDirectiveKind::Parallel => "parallel",
            OmpDirectiveKind::ParallelFor => "parallel for",
            OmpDirectiveKind::ParallelForSimd => "parallel for simd",
            OmpDirectiveKind::ParallelSections => "parallel sections",
            OmpDirectiveKind::ParallelWorkshare => "parallel workshare",
            OmpDirectiveKind::ParallelLoop => "parallel loop",
            OmpDirectiveKind::ParallelMasked => "parallel masked",
            OmpDirectiveKind::ParallelMaster => "parallel master",
            OmpDirectiveKind::ParallelMaskedTaskloop => "parallel masked taskloop",
            OmpDirectiveKind::ParallelMaskedTaskloopSimd => "parallel masked taskloop simd",
            OmpDirectiveKind::ParallelMasterTaskloop => "parallel master taskloop",
            OmpDirectiveKind::ParallelMasterTaskloopSimd => "parallel master taskloop simd",
            OmpDirectiveKind::For => "for",
            OmpDirectiveKind::ForSimd => "for simd",
            OmpDirectiveKind::Sections => "sections",
            OmpDirectiveKind::Section => "section",
            OmpDirectiveKind::Single => "single",
            OmpDirectiveKind::Workshare => "workshare",
            OmpDirectiveKind::Loop => "loop",
            OmpDirectiveKind::Scope => "scope",
            OmpDirectiveKind::Simd => "simd",
            OmpDirectiveKind::DeclareSimd => "declare simd",
            OmpDirectiveKind::Task => "task",
            OmpDirectiveKind::Taskloop => "taskloop",
            OmpDirectiveKind::TaskloopSimd => "taskloop simd",
            OmpDirectiveKind::Taskyield => "taskyield",
            OmpDirectiveKind::Taskwait => "taskwait",
            OmpDirectiveKind::Taskgroup => "taskgroup",
            OmpDirectiveKind::Masked => "masked",
            OmpDirectiveKind::MaskedTaskloop => "masked taskloop",
            OmpDirectiveKind::MaskedTaskloopSimd => "masked taskloop simd",
            OmpDirectiveKind::Master => "master",
            OmpDirectiveKind::MasterTaskloop => "master taskloop",
            OmpDirectiveKind::MasterTaskloopSimd => "master taskloop simd",
            OmpDirectiveKind::Target => "target",
            OmpDirectiveKind::TargetData => "target data",
            OmpDirectiveKind::TargetEnterData => "target enter data",
            OmpDirectiveKind::TargetExitData => "target exit data",
            OmpDirectiveKind::TargetUpdate => "target update",
            OmpDirectiveKind::TargetParallel => "target parallel",
            OmpDirectiveKind::TargetParallelFor => "target parallel for",
            OmpDirectiveKind::TargetParallelForSimd => "target parallel for simd",
            OmpDirectiveKind::TargetParallelLoop => "target parallel loop",
            OmpDirectiveKind::TargetSimd => "target simd",
            OmpDirectiveKind::TargetTeams => "target teams",
            OmpDirectiveKind::TargetTeamsDistribute => "target teams distribute",
            OmpDirectiveKind::TargetTeamsDistributeSimd => "target teams distribute simd",
            OmpDirectiveKind::TargetTeamsDistributeParallelFor => {
                "target teams distribute parallel for"
            }
            OmpDirectiveKind::TargetTeamsDistributeParallelForSimd => {
                "target teams distribute parallel for simd"
            }
            OmpDirectiveKind::TargetTeamsLoop => "target teams loop",
            OmpDirectiveKind::Teams => "teams",
            OmpDirectiveKind::TeamsDistribute => "teams distribute",
            OmpDirectiveKind::TeamsDistributeSimd => "teams distribute simd",
            OmpDirectiveKind::TeamsDistributeParallelFor => "teams distribute parallel for",
            OmpDirectiveKind::TeamsDistributeParallelForSimd => {
                "teams distribute parallel for simd"
            }
            OmpDirectiveKind::TeamsLoop => "teams loop",
            OmpDirectiveKind::Distribute => "distribute",
            OmpDirectiveKind::DistributeSimd => "distribute simd",
            OmpDirectiveKind::DistributeParallelFor => "distribute parallel for",
            OmpDirectiveKind::DistributeParallelForSimd => "distribute parallel for simd",
            OmpDirectiveKind::Barrier => "barrier",
            OmpDirectiveKind::Critical => "critical",
            OmpDirectiveKind::Atomic => "atomic",
            OmpDirectiveKind::Flush => "flush",
            OmpDirectiveKind::Ordered => "ordered",
            OmpDirectiveKind::Cancel => "cancel",
            OmpDirectiveKind::CancellationPoint => "cancellation point",
            OmpDirectiveKind::Depobj => "depobj",
            OmpDirectiveKind::Scan => "scan",
            OmpDirectiveKind::CancelParallel => "cancel parallel",
            OmpDirectiveKind::CancelFor => "cancel for",
            OmpDirectiveKind::CancelSections => "cancel sections",
            OmpDirectiveKind::CancelTaskgroup => "cancel taskgroup",
            OmpDirectiveKind::CancellationPointParallel => "cancellation point parallel",
            OmpDirectiveKind::CancellationPointFor => "cancellation point for",
            OmpDirectiveKind::CancellationPointSections => "cancellation point sections",
            OmpDirectiveKind::CancellationPointTaskgroup => "cancellation point taskgroup",
            OmpDirectiveKind::Threadprivate => "threadprivate",
            OmpDirectiveKind::DeclareReduction => "declare reduction",
            OmpDirectiveKind::DeclareMapper => "declare mapper",
            OmpDirectiveKind::DeclareTarget => "declare target",
            OmpDirectiveKind::EndDeclareTarget => "end declare target",
            OmpDirectiveKind::DeclareVariant => "declare variant",
            OmpDirectiveKind::Requires => "requires",
            OmpDirectiveKind::Allocate => "allocate",
            OmpDirectiveKind::Metadirective => "metadirective",
            OmpDirectiveKind::Dispatch => "dispatch",
            OmpDirectiveKind::Interop => "interop",
            OmpDirectiveKind::Nothing => "nothing",
            OmpDirectiveKind::Error => "error",
            OmpDirectiveKind::Tile => "tile",
            OmpDirectiveKind::Unroll => "unroll",
        }
    }

    /// Kinds that accept a parenthesized argument directly after the
    /// keywords (`critical(name)`, `flush(list)`, ...).
    pub const fn takes_argument(self) -> bool {
        matches!(
            self,
            OmpDirectiveKind::Critical
                | OmpDirectiveKind::Flush
                | OmpDirectiveKind::Threadprivate
                | OmpDirectiveKind::Allocate
                | OmpDirectiveKind::Depobj
                | OmpDirectiveKind::Scan
                | OmpDirectiveKind::DeclareReduction
                | OmpDirectiveKind::DeclareMapper
                | OmpDirectiveKind::DeclareTarget
                | OmpDirectiveKind::DeclareVariant
        )
    }
}

impl fmt::Display for OmpDirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// OpenACC directive kinds, including the paired `end` constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AccDirectiveKind {
    Parallel = 0,
    ParallelLoop = 1,
    Kernels = 2,
    KernelsLoop = 3,
    Serial = 4,
    SerialLoop = 5,
    Loop = 6,
    Data = 10,
    EnterData = 11,
    ExitData = 12,
    HostData = 13,
    Declare = 14,
    Update = 20,
    Wait = 21,
    Cache = 22,
    Atomic = 23,
    Routine = 24,
    Init = 30,
    Shutdown = 31,
    Set = 32,
    EndParallel = 40,
    EndParallelLoop = 41,
    EndKernels = 42,
    EndKernelsLoop = 43,
    EndSerial = 44,
    EndSerialLoop = 45,
    EndData = 46,
    EndHostData = 47,
    EndAtomic = 48,
}

impl AccDirectiveKind {
    pub const ALL: &'static [AccDirectiveKind] = &[
        AccDirectiveKind::Parallel,
        AccDirectiveKind::ParallelLoop,
        AccDirectiveKind::Kernels,
        AccDirectiveKind::KernelsLoop,
        AccDirectiveKind::Serial,
        AccDirectiveKind::SerialLoop,
        AccDirectiveKind::Loop,
        AccDirectiveKind::Data,
        AccDirectiveKind::EnterData,
        AccDirectiveKind::ExitData,
        AccDirectiveKind::HostData,
        AccDirectiveKind::Declare,
        AccDirectiveKind::Update,
        AccDirectiveKind::Wait,
        AccDirectiveKind::Cache,
        AccDirectiveKind::Atomic,
        AccDirectiveKind::Routine,
        AccDirectiveKind::Init,
        AccDirectiveKind::Shutdown,
        AccDirectiveKind::Set,
        AccDirectiveKind::EndParallel,
        AccDirectiveKind::EndParallelLoop,
        AccDirectiveKind::EndKernels,
        AccDirectiveKind::EndKernelsLoop,
        AccDirectiveKind::EndSerial,
        AccDirectiveKind::EndSerialLoop,
        AccDirectiveKind::EndData,
        AccDirectiveKind::EndHostData,
        AccDirectiveKind::EndAtomic,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            AccDirectiveKind::Parallel => "parallel",
            AccDirectiveKind::ParallelLoop => "parallel loop",
            AccDirectiveKind::Kernels => "kernels",
            AccDirectiveKind::KernelsLoop => "kernels loop",
            AccDirectiveKind::Serial => "serial",
            AccDirectiveKind::SerialLoop => "serial loop",
            AccDirectiveKind::Loop => "loop",
            AccDirectiveKind::Data => "data",
            AccDirectiveKind::EnterData => "enter data",
            AccDirectiveKind::ExitData => "exit data",
            AccDirectiveKind::HostData => "host_data",
            AccDirectiveKind::Declare => "declare",
            AccDirectiveKind::Update => "update",
            AccDirectiveKind::Wait => "wait",
            AccDirectiveKind::Cache => "cache",
            AccDirectiveKind::Atomic => "atomic",
            AccDirectiveKind::Routine => "routine",
            AccDirectiveKind::Init => "init",
            AccDirectiveKind::Shutdown => "shutdown",
            AccDirectiveKind::Set => "set",
            AccDirectiveKind::EndParallel => "end parallel",
            AccDirectiveKind::EndParallelLoop => "end parallel loop",
            AccDirectiveKind::EndKernels => "end kernels",
            AccDirectiveKind::EndKernelsLoop => "end kernels loop",
            AccDirectiveKind::EndSerial => "end serial",
            AccDirectiveKind::EndSerialLoop => "end serial loop",
            AccDirectiveKind::EndData => "end data",
            AccDirectiveKind::EndHostData => "end host_data",
            AccDirectiveKind::EndAtomic => "end atomic",
        }
    }

    /// Alternate surface spellings accepted on input.
    pub const ALIASES: &'static [(&'static str, AccDirectiveKind)] = &[
        ("enter_data", AccDirectiveKind::EnterData),
        ("exit_data", AccDirectiveKind::ExitData),
        ("host data", AccDirectiveKind::HostData),
        ("end host data", AccDirectiveKind::EndHostData),
    ];

    pub const fn takes_argument(self) -> bool {
        matches!(
            self,
            AccDirectiveKind::Cache | AccDirectiveKind::Wait | AccDirectiveKind::Routine
        )
    }

    /// The construct a paired `end` directive closes, if this is one.
    pub const fn paired_construct(self) -> Option<AccDirectiveKind> {
        match self {
            AccDirectiveKind::EndParallel => Some(AccDirectiveKind::Parallel),
            AccDirectiveKind::EndParallelLoop => Some(AccDirectiveKind::ParallelLoop),
            AccDirectiveKind::EndKernels => Some(AccDirectiveKind::Kernels),
            AccDirectiveKind::EndKernelsLoop => Some(AccDirectiveKind::KernelsLoop),
            AccDirectiveKind::EndSerial => Some(AccDirectiveKind::Serial),
            AccDirectiveKind::EndSerialLoop => Some(AccDirectiveKind::SerialLoop),
            AccDirectiveKind::EndData => Some(AccDirectiveKind::Data),
            AccDirectiveKind::EndHostData => Some(AccDirectiveKind::HostData),
            AccDirectiveKind::EndAtomic => Some(AccDirectiveKind::Atomic),
            _ => None,
        }
    }
}

impl fmt::Display for AccDirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Dialect-tagged directive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectiveKind {
    Omp(OmpDirectiveKind),
    Acc(AccDirectiveKind),
}

impl DirectiveKind {
    pub const fn dialect(self) -> Dialect {
        match self {
            DirectiveKind::Omp(_) => Dialect::OpenMp,
            DirectiveKind::Acc(_) => Dialect::OpenAcc,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DirectiveKind::Omp(kind) => kind.name(),
            DirectiveKind::Acc(kind) => kind.name(),
        }
    }

    /// Stable numeric tag for the C ABI; the dialect is carried separately.
    pub const fn repr(self) -> u32 {
        match self {
            DirectiveKind::Omp(kind) => kind as u32,
            DirectiveKind::Acc(kind) => kind as u32,
        }
    }

    pub const fn takes_argument(self) -> bool {
        match self {
            DirectiveKind::Omp(kind) => kind.takes_argument(),
            DirectiveKind::Acc(kind) => kind.takes_argument(),
        }
    }

    pub const fn as_omp(self) -> Option<OmpDirectiveKind> {
        match self {
            DirectiveKind::Omp(kind) => Some(kind),
            DirectiveKind::Acc(_) => None,
        }
    }

    pub const fn as_acc(self) -> Option<AccDirectiveKind> {
        match self {
            DirectiveKind::Acc(kind) => Some(kind),
            DirectiveKind::Omp(_) => None,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_kinds_are_single_names() {
        assert_eq!(
            OmpDirectiveKind::TargetTeamsDistributeParallelForSimd.name(),
            "target teams distribute parallel for simd"
        );
        assert_eq!(AccDirectiveKind::KernelsLoop.name(), "kernels loop");
    }

    #[test]
    fn test_all_tables_cover_names_uniquely() {
        let mut seen = std::collections::HashSet::new();
        for kind in OmpDirectiveKind::ALL {
            assert!(seen.insert(kind.name()), "duplicate name {}", kind.name());
        }
        let mut seen = std::collections::HashSet::new();
        for kind in AccDirectiveKind::ALL {
            assert!(seen.insert(kind.name()), "duplicate name {}", kind.name());
        }
    }

    #[test]
    fn test_paired_end_constructs() {
        assert_eq!(
            AccDirectiveKind::EndParallelLoop.paired_construct(),
            Some(AccDirectiveKind::ParallelLoop)
        );
        assert_eq!(AccDirectiveKind::Parallel.paired_construct(), None);
    }

    #[test]
    fn test_dialect_tagging() {
        let kind = DirectiveKind::Omp(OmpDirectiveKind::ParallelFor);
        assert_eq!(kind.dialect(), Dialect::OpenMp);
        assert_eq!(kind.name(), "parallel for");
        assert_eq!(kind.repr(), OmpDirectiveKind::ParallelFor as u32);
    }
}
