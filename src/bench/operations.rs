//! The timed pickle/unpickle loops
//!
//! Each operation runs `loops` outer iterations of a fixed number of library
//! calls and returns the wall-clock time of the whole batch. Nothing but the
//! library calls happens between the two clock reads.

use super::Workload;
use crate::error::Result;
use crate::pickle::Pickler;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Signature shared by every timed operation
pub type TimedOp = fn(loops: u64, pickler: &dyn Pickler, workload: &Workload) -> Result<Duration>;

/// Calls per object in `pickle`/`unpickle`
pub const RECORD_REPEAT: u32 = 20;
/// Calls per outer loop in `pickle_list`/`unpickle_list`
pub const LIST_REPEAT: u32 = 10;
/// Calls per outer loop in `pickle_dict`
pub const DICT_REPEAT: u32 = 5;

/// Pickle the profile, the tuple and the profile group 20 times each
pub fn bench_pickle(loops: u64, pickler: &dyn Pickler, workload: &Workload) -> Result<Duration> {
    let objs = workload.fixtures.record_objects();
    let protocol = workload.protocol;
    let t0 = Instant::now();

    for _ in 0..loops {
        for obj in objs {
            for _ in 0..RECORD_REPEAT {
                black_box(pickler.dumps(black_box(obj), protocol)?);
            }
        }
    }

    Ok(t0.elapsed())
}

/// Unpickle the profile, the tuple and the profile group 20 times each
pub fn bench_unpickle(loops: u64, pickler: &dyn Pickler, workload: &Workload) -> Result<Duration> {
    let payloads = workload.encoded.record_payloads();
    let t0 = Instant::now();

    for _ in 0..loops {
        for payload in payloads {
            for _ in 0..RECORD_REPEAT {
                black_box(pickler.loads(black_box(payload))?);
            }
        }
    }

    Ok(t0.elapsed())
}

/// Pickle the list of lists 10 times
pub fn bench_pickle_list(loops: u64, pickler: &dyn Pickler, workload: &Workload) -> Result<Duration> {
    let obj = &workload.fixtures.list;
    let protocol = workload.protocol;
    let t0 = Instant::now();

    for _ in 0..loops {
        for _ in 0..LIST_REPEAT {
            black_box(pickler.dumps(black_box(obj), protocol)?);
        }
    }

    Ok(t0.elapsed())
}

/// Unpickle the list of lists 10 times
pub fn bench_unpickle_list(
    loops: u64,
    pickler: &dyn Pickler,
    workload: &Workload,
) -> Result<Duration> {
    let payload = workload.encoded.list.as_slice();
    let t0 = Instant::now();

    for _ in 0..loops {
        for _ in 0..LIST_REPEAT {
            black_box(pickler.loads(black_box(payload))?);
        }
    }

    Ok(t0.elapsed())
}

/// Pickle the dict of dicts 5 times
pub fn bench_pickle_dict(loops: u64, pickler: &dyn Pickler, workload: &Workload) -> Result<Duration> {
    let obj = &workload.fixtures.micro_dict;
    let protocol = workload.protocol;
    let t0 = Instant::now();

    for _ in 0..loops {
        for _ in 0..DICT_REPEAT {
            black_box(pickler.dumps(black_box(obj), protocol)?);
        }
    }

    Ok(t0.elapsed())
}

#[cfg(all(test, feature = "accelerated"))]
mod tests {
    use super::*;
    use crate::error::PickleResult;
    use crate::fixtures::Fixtures;
    use crate::pickle::{NativePickler, Protocol, Value};
    use std::cell::Cell;

    /// Counts library calls made through it
    #[derive(Default)]
    struct CountingPickler {
        inner: NativePickler,
        dumps: Cell<u64>,
        loads: Cell<u64>,
    }

    impl CountingPickler {
        fn reset(&self) {
            self.dumps.set(0);
            self.loads.set(0);
        }

        fn calls(&self) -> u64 {
            self.dumps.get() + self.loads.get()
        }
    }

    impl Pickler for CountingPickler {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn is_accelerated(&self) -> bool {
            true
        }

        fn dumps(&self, obj: &Value, protocol: Protocol) -> PickleResult<Vec<u8>> {
            self.dumps.set(self.dumps.get() + 1);
            self.inner.dumps(obj, protocol)
        }

        fn loads(&self, data: &[u8]) -> PickleResult<Value> {
            self.loads.set(self.loads.get() + 1);
            self.inner.loads(data)
        }
    }

    fn workload(pickler: &CountingPickler) -> Workload {
        let workload = Workload::prepare(pickler, Fixtures::default(), Protocol::HIGHEST).unwrap();
        pickler.reset();
        workload
    }

    const ALL: [(TimedOp, u64); 5] = [
        (bench_pickle, 3 * RECORD_REPEAT as u64),
        (bench_unpickle, 3 * RECORD_REPEAT as u64),
        (bench_pickle_list, LIST_REPEAT as u64),
        (bench_unpickle_list, LIST_REPEAT as u64),
        (bench_pickle_dict, DICT_REPEAT as u64),
    ];

    #[test]
    fn test_zero_loops_make_no_calls() {
        let pickler = CountingPickler::default();
        let workload = workload(&pickler);
        for (op, _) in ALL {
            let elapsed = op(0, &pickler, &workload).unwrap();
            assert!(elapsed >= Duration::ZERO);
            assert_eq!(pickler.calls(), 0);
        }
    }

    #[test]
    fn test_call_counts_per_loop() {
        let pickler = CountingPickler::default();
        let workload = workload(&pickler);
        for (op, per_loop) in ALL {
            pickler.reset();
            op(2, &pickler, &workload).unwrap();
            assert_eq!(pickler.calls(), 2 * per_loop);
        }
    }

    #[test]
    fn test_pickle_only_dumps_and_unpickle_only_loads() {
        let pickler = CountingPickler::default();
        let workload = workload(&pickler);

        bench_pickle(1, &pickler, &workload).unwrap();
        assert_eq!(pickler.loads.get(), 0);

        pickler.reset();
        bench_unpickle(1, &pickler, &workload).unwrap();
        assert_eq!(pickler.dumps.get(), 0);
    }

    #[test]
    fn test_errors_abort_the_batch() {
        let pickler = CountingPickler::default();
        let mut workload = workload(&pickler);
        workload.encoded.list = vec![0x00];
        assert!(bench_unpickle_list(1, &pickler, &workload).is_err());
        assert_eq!(pickler.loads.get(), 1);
    }
}
