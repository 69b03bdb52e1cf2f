use crate::chain::{ChainError, LetTask};
use crate::job::{
    earliest_index_at_or_after, latest_index_at_or_before, AugmentedJobChain, Job, JobChain,
    PartitionedJobChain,
};
use crate::tests::{d, i, let_set, let_task};

fn indices(jc: &JobChain) -> Vec<i64> {
    jc.indices().collect()
}

#[test]
fn let_events() {
    let a = let_task(10, 0, 10);
    let job = Job::new(a, 2);
    assert_eq!(job.read_event(), i(20));
    assert_eq!(job.write_event(), i(30));
    assert!(job.exists());
    assert!(!Job::new(a, -1).exists());
    assert_eq!(Job::new(a, -1).read_event(), i(-10));

    let p = let_task(10, 5, 7);
    assert_eq!(Job::new(p, 0).read_event(), i(5));
    assert_eq!(Job::new(p, 0).write_event(), i(12));
    assert_eq!(Job::new(p, 3).write_event(), i(42));
}

#[test]
fn earliest_index() {
    let a = let_task(10, 0, 10);
    assert_eq!(earliest_index_at_or_after(i(20), &a), 2);
    assert_eq!(earliest_index_at_or_after(i(21), &a), 3);
    assert_eq!(earliest_index_at_or_after(i(29), &a), 3);
    // jobs before the first release do not exist
    assert_eq!(earliest_index_at_or_after(i(-5), &a), 0);
    assert_eq!(earliest_index_at_or_after(i(-50), &a), 0);

    let p = let_task(10, 5, 7);
    assert_eq!(earliest_index_at_or_after(i(5), &p), 0);
    assert_eq!(earliest_index_at_or_after(i(6), &p), 1);
}

#[test]
fn latest_index() {
    let a = let_task(10, 0, 10);
    assert_eq!(latest_index_at_or_before(i(29), &a), 1);
    assert_eq!(latest_index_at_or_before(i(30), &a), 2);
    assert_eq!(latest_index_at_or_before(i(9), &a), -1);
    assert_eq!(latest_index_at_or_before(i(5), &a), -1);

    let p = let_task(10, 5, 7);
    assert_eq!(latest_index_at_or_before(i(11), &p), -1);
    assert_eq!(latest_index_at_or_before(i(12), &p), 0);
    assert_eq!(latest_index_at_or_before(i(-30), &p), -5);
}

#[test]
fn index_functions_are_tight() {
    let tasks = [
        let_task(10, 0, 10),
        let_task(7, 3, 2),
        let_task(4, 1, 9),
        let_task(1, 0, 0),
    ];
    for task in tasks.iter() {
        for t in -40..80 {
            let time = i(t);
            let e = earliest_index_at_or_after(time, task);
            assert!(Job::new(*task, e).read_event() >= time);
            if e > 0 {
                assert!(Job::new(*task, e - 1).read_event() < time);
            }
            let l = latest_index_at_or_before(time, task);
            assert!(Job::new(*task, l).write_event() <= time);
            assert!(Job::new(*task, l + 1).write_event() > time);
        }
    }
}

#[test]
fn forward_chains() {
    let tasks = [let_task(10, 0, 10), let_task(15, 0, 15)];
    let expected = [[0, 1], [1, 2], [2, 2], [3, 3]];
    for (n, exp) in expected.iter().enumerate() {
        let fw = JobChain::forward(&tasks, n as i64);
        assert_eq!(indices(&fw), exp.to_vec());
        assert!(fw.is_complete());
    }
    let fw = JobChain::forward(&tasks, 1);
    assert_eq!(fw.len(), 2);
    assert_eq!(fw.ell(), d(45 - 10));
    assert_eq!(fw.to_string(), "[ #1 -> #2 ]");

    let with_phase = [let_task(10, 5, 7), let_task(4, 0, 4)];
    assert_eq!(indices(&JobChain::forward(&with_phase, 0)), vec![0, 3]);
}

#[test]
fn backward_chains() {
    let tasks = [let_task(10, 0, 10), let_task(15, 0, 15)];
    let bw = JobChain::backward(&tasks, 0);
    assert_eq!(indices(&bw), vec![-1, 0]);
    assert!(!bw.is_complete());

    let expected = [[0, 1], [2, 2], [3, 3]];
    for (n, exp) in expected.iter().enumerate() {
        let bw = JobChain::backward(&tasks, n as i64 + 1);
        assert_eq!(indices(&bw), exp.to_vec());
        assert!(bw.is_complete());
    }

    let with_phase = [let_task(10, 5, 7), let_task(4, 0, 4)];
    assert_eq!(indices(&JobChain::backward(&with_phase, 3)), vec![0, 3]);
    assert_eq!(indices(&JobChain::backward(&with_phase, 0)), vec![-2, 0]);
}

#[test]
fn incomplete_chains_are_still_computed() {
    let tasks = [let_task(5, 0, 5), let_task(20, 0, 20), let_task(10, 0, 10)];
    assert_eq!(indices(&JobChain::forward(&tasks, 0)), vec![0, 1, 4]);
    let bw = JobChain::backward(&tasks, 2);
    assert_eq!(indices(&bw), vec![-1, 0, 2]);
    assert!(!bw.is_complete());
    assert_eq!(indices(&JobChain::backward(&tasks, 0)), vec![-5, -1, 0]);
}

#[test]
fn single_task_chains_degenerate() {
    let tasks = [let_task(10, 3, 7)];
    assert_eq!(indices(&JobChain::forward(&tasks, 4)), vec![4]);
    assert_eq!(indices(&JobChain::backward(&tasks, 4)), vec![4]);
    assert_eq!(JobChain::forward(&tasks, 4).ell(), d(7));
}

#[test]
#[should_panic]
fn empty_forward_chain() {
    let tasks: [LetTask; 0] = [];
    JobChain::forward(&tasks, 0);
}

#[test]
fn augmented_chains() {
    let ts = let_set(&[(10, 0, 10), (15, 0, 15)]);
    let ce = ts.chain(&[0, 1]).unwrap();

    let fw = AugmentedJobChain::forward(&ce, 0);
    assert_eq!(fw.external_activation(), i(0));
    assert_eq!(indices(fw.jobs()), vec![1, 2]);
    assert_eq!(fw.actuation(), i(45));
    assert_eq!(fw.ell(), d(45));
    assert_eq!(fw.ellstar(), d(35));
    assert!(fw.is_complete());
    assert!(fw.is_valid(&ce));

    let bw = AugmentedJobChain::backward(&ce, 2);
    assert_eq!(bw.actuation(), i(45));
    assert_eq!(indices(bw.jobs()), vec![0, 1]);
    assert_eq!(bw.external_activation(), i(0));
    assert_eq!(bw.ell(), d(45));
    assert_eq!(bw.ellstar(), d(30));
    assert!(bw.is_complete());

    let early = AugmentedJobChain::backward(&ce, 0);
    assert_eq!(indices(early.jobs()), vec![-3, -1]);
    assert_eq!(early.external_activation(), i(-30));
    assert!(!early.is_complete());
}

#[test]
fn validity_requires_steady_state() {
    // the second task is released late, so the first source job
    // after the stimulus must come after time 12
    let ts = let_set(&[(5, 0, 5), (10, 12, 10)]);
    let ce = ts.chain(&[0, 1]).unwrap();
    assert!(!AugmentedJobChain::forward(&ce, 0).is_valid(&ce));
    assert!(!AugmentedJobChain::forward(&ce, 1).is_valid(&ce));
    assert!(AugmentedJobChain::forward(&ce, 2).is_valid(&ce));
}

#[test]
fn partitioned_chains() {
    let ts = let_set(&[(10, 0, 10), (15, 0, 15)]);
    let ce = ts.chain(&[0, 1]).unwrap();

    let at_sink = PartitionedJobChain::new(&ce, 1, 1).unwrap();
    assert_eq!(indices(at_sink.backward()), vec![0, 1]);
    assert_eq!(indices(at_sink.forward()), vec![2]);
    assert_eq!(at_sink.first_read(), i(0));
    assert_eq!(at_sink.ell(), d(45));
    assert!(at_sink.is_complete());
    assert_eq!(at_sink.partition(), 1);
    assert_eq!(at_sink.anchor(), 1);

    // partitioning at the source yields the forward augmented chain
    let at_source = PartitionedJobChain::new(&ce, 0, 0).unwrap();
    assert_eq!(indices(at_source.backward()), vec![0]);
    assert_eq!(indices(at_source.forward()), vec![1, 2]);
    assert_eq!(at_source.ell(), AugmentedJobChain::forward(&ce, 0).ell());

    assert!(!PartitionedJobChain::new(&ce, 1, 0).unwrap().is_complete());
    assert_eq!(
        PartitionedJobChain::new(&ce, 2, 0).err(),
        Some(ChainError::PartitionOutOfRange {
            partition: 2,
            length: 2
        })
    );
}
