//! Fixed registry of benchmark names

use super::operations::{
    bench_pickle, bench_pickle_dict, bench_pickle_list, bench_unpickle, bench_unpickle_list,
    TimedOp, DICT_REPEAT, LIST_REPEAT, RECORD_REPEAT,
};
use clap::ValueEnum;
use std::fmt;

/// Selectable benchmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum BenchmarkName {
    /// Pickle the profile record, the tuple and the profile group
    #[value(name = "pickle")]
    Pickle,
    /// Pickle the dict of dicts
    #[value(name = "pickle_dict")]
    PickleDict,
    /// Pickle the list of lists
    #[value(name = "pickle_list")]
    PickleList,
    /// Unpickle the profile record, the tuple and the profile group
    #[value(name = "unpickle")]
    Unpickle,
    /// Unpickle the list of lists
    #[value(name = "unpickle_list")]
    UnpickleList,
}

impl BenchmarkName {
    /// Registry key
    pub fn as_str(self) -> &'static str {
        match self {
            BenchmarkName::Pickle => "pickle",
            BenchmarkName::PickleDict => "pickle_dict",
            BenchmarkName::PickleList => "pickle_list",
            BenchmarkName::Unpickle => "unpickle",
            BenchmarkName::UnpickleList => "unpickle_list",
        }
    }
}

impl fmt::Display for BenchmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registry entry: the timed operation and its inner-loop count
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkSpec {
    /// Benchmark name
    pub name: BenchmarkName,
    /// Timed operation
    pub func: TimedOp,
    /// Library calls per object per outer loop, used to normalise timings
    pub inner_loops: u32,
}

/// All benchmarks, sorted by name
pub static BENCHMARKS: [BenchmarkSpec; 5] = [
    // 20 inner loops: the 3 pickled objects are not counted
    BenchmarkSpec {
        name: BenchmarkName::Pickle,
        func: bench_pickle,
        inner_loops: RECORD_REPEAT,
    },
    BenchmarkSpec {
        name: BenchmarkName::PickleDict,
        func: bench_pickle_dict,
        inner_loops: DICT_REPEAT,
    },
    BenchmarkSpec {
        name: BenchmarkName::PickleList,
        func: bench_pickle_list,
        inner_loops: LIST_REPEAT,
    },
    // 20 inner loops: the 3 unpickled objects are not counted
    BenchmarkSpec {
        name: BenchmarkName::Unpickle,
        func: bench_unpickle,
        inner_loops: RECORD_REPEAT,
    },
    BenchmarkSpec {
        name: BenchmarkName::UnpickleList,
        func: bench_unpickle_list,
        inner_loops: LIST_REPEAT,
    },
];

/// Registry entry for `name`
pub fn lookup(name: BenchmarkName) -> &'static BenchmarkSpec {
    // BENCHMARKS is indexed in declaration order of BenchmarkName
    &BENCHMARKS[name as usize]
}
