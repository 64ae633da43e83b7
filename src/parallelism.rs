use crossbeam_channel::TryRecvError;
use itertools::Itertools;
use log::trace;
use std::thread;

/// Apply `runner` to every item on a pool of worker threads.
///
/// Every job writes to its own slot, so the result is in the same order as `items`.
pub fn map_parallel<TItem, TResult, TRunner>(items: &[TItem], runner: TRunner) -> Vec<TResult>
where
    TItem: Sync,
    TResult: Send,
    TRunner: Fn(&TItem) -> TResult + Sync,
{
    let (s1, r1) = crossbeam_channel::unbounded();
    for job in 0..items.len() {
        s1.send(job).unwrap();
    }
    drop(s1);
    let nthreads = num_cpus::get().min(items.len()).max(1);
    let mut slots: Vec<Option<TResult>> = (0..items.len()).map(|_| None).collect_vec();
    trace!("{} jobs, {nthreads} threads", items.len());
    thread::scope(|scope| {
        let (s2, r2) = crossbeam_channel::unbounded();
        for _ in 0..nthreads {
            let r1 = r1.clone();
            let s2 = s2.clone();
            let runner = &runner;
            scope.spawn(move || {
                loop {
                    match r1.try_recv() {
                        Ok(job) => {
                            s2.send((job, runner(&items[job]))).unwrap();
                        }
                        Err(TryRecvError::Empty) => unreachable!(),
                        Err(TryRecvError::Disconnected) => break,
                    }
                }
            });
        }
        drop(s2);
        while let Ok((job, result)) = r2.recv() {
            slots[job] = Some(result);
        }
    });
    slots
        .into_iter()
        .map(|x| x.expect("every job reports a result"))
        .collect_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keeps_order() {
        let items = (0..100u64).collect_vec();
        let r = map_parallel(&items, |x| x * x);
        assert_eq!(r, items.iter().map(|x| x * x).collect_vec());
    }

    #[test]
    fn empty() {
        let items: Vec<u64> = vec![];
        let r = map_parallel(&items, |x| *x);
        assert!(r.is_empty());
    }
}
