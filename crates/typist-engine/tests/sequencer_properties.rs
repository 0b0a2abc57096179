//! End-to-end behavior of the sequencer against recording surfaces.

use std::time::Duration;

use typist_core::{Glyph, Operation, Script, ScriptBuilder, Typewriter, UnderflowError};
use typist_engine::{
    CancelToken, ManualClock, OutputSurface, RecordingSurface, RunOutcome, Sequencer,
    SequencerError, Status, SurfaceEvent, UnderflowPolicy,
};

fn run_script(ops: Vec<Operation>) -> Sequencer<RecordingSurface> {
    let mut seq = Sequencer::builder(Script::new(ops))
        .surface(RecordingSurface::new())
        .underflow_policy(UnderflowPolicy::Fail)
        .build()
        .unwrap();
    let outcome = seq.run(&mut ManualClock::new(), &CancelToken::new()).unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    seq
}

#[test]
fn visits_every_operation_in_order() {
    let ops = vec![
        Operation::pause(5),
        Operation::type_text("abc"),
        Operation::set_delete_delay(1),
        Operation::delete_chars(2),
        Operation::set_type_delay(1),
        Operation::type_text("Z"),
    ];
    let mut seq = Sequencer::new(Script::new(ops.clone()), RecordingSurface::new()).unwrap();
    let mut clock = ManualClock::new();
    let cancel = CancelToken::new();

    let mut visited = Vec::new();
    while let typist_engine::StepOutcome::Executed(index) = seq.step(&mut clock, &cancel).unwrap()
    {
        visited.push(index);
    }

    assert_eq!(visited, (0..ops.len()).collect::<Vec<_>>());
    assert_eq!(seq.executed(), ops.len());
    assert_eq!(seq.visible_text(), "aZ");
}

#[test]
fn type_text_appends_exactly_its_glyphs() {
    let seq = run_script(vec![
        Operation::type_text("Hello, "),
        Operation::type_text("<strong>World!</strong>"),
    ]);

    assert_eq!(seq.visible_text(), "Hello, World!");
    assert_eq!(seq.buffer().len(), 13);
    assert!(seq.buffer()[7..].iter().all(|g| g.emphasis.bold));
    assert!(seq.buffer()[..7].iter().all(|g| g.emphasis.is_plain()));
}

#[test]
fn delete_removes_the_trailing_glyphs() {
    let seq = run_script(vec![
        Operation::type_text("abcdef"),
        Operation::delete_chars(4),
    ]);

    assert_eq!(seq.visible_text(), "ab");
    let removed: Vec<char> = seq
        .surface()
        .events()
        .iter()
        .filter_map(|e| match e {
            SurfaceEvent::Removed(g) => Some(g.ch),
            SurfaceEvent::Inserted(_) => None,
        })
        .collect();
    assert_eq!(removed, vec!['f', 'e', 'd', 'c']);
}

#[test]
fn second_start_after_completion_changes_nothing() {
    let mut seq = run_script(vec![Operation::type_text("done")]);
    let events_before = seq.surface().events().len();

    assert!(!seq.start());
    let outcome = seq.run(&mut ManualClock::new(), &CancelToken::new()).unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(seq.status(), Status::Completed);
    assert_eq!(seq.visible_text(), "done");
    assert_eq!(seq.surface().events().len(), events_before);
}

#[test]
fn hi_then_bye() {
    let seq = run_script(vec![
        Operation::type_text("Hi"),
        Operation::pause(10),
        Operation::delete_chars(2),
        Operation::type_text("Bye"),
    ]);

    assert_eq!(seq.visible_text(), "Bye");
    assert_eq!(seq.surface().text(), "Bye");
    assert_eq!(seq.surface().finished(), Some(Status::Completed));
}

#[test]
fn deleting_everything_then_one_more_fails() {
    let seq = run_script(vec![Operation::type_text("Hi"), Operation::delete_chars(2)]);
    assert_eq!(seq.visible_text(), "");

    let mut seq = Sequencer::builder(Script::new(vec![
        Operation::type_text("Hi"),
        Operation::delete_chars(2),
        Operation::delete_chars(1),
    ]))
    .surface(RecordingSurface::new())
    .underflow_policy(UnderflowPolicy::Fail)
    .build()
    .unwrap();

    let err = seq
        .run(&mut ManualClock::new(), &CancelToken::new())
        .unwrap_err();
    assert_eq!(
        err,
        SequencerError::Underflow(UnderflowError {
            index: 2,
            requested: 1,
            available: 0,
        })
    );
    assert_eq!(seq.visible_text(), "");
}

#[test]
fn deleting_everything_then_one_more_clamps() {
    let mut seq = Sequencer::builder(Script::new(vec![
        Operation::type_text("Hi"),
        Operation::delete_chars(2),
        Operation::delete_chars(1),
    ]))
    .surface(RecordingSurface::new())
    .underflow_policy(UnderflowPolicy::Clamp)
    .build()
    .unwrap();

    let outcome = seq.run(&mut ManualClock::new(), &CancelToken::new()).unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(seq.visible_text(), "");
}

#[test]
fn type_delay_change_spaces_the_next_reveals() {
    let mut seq = Sequencer::builder(Script::new(vec![
        Operation::set_type_delay(5),
        Operation::type_text("ab"),
    ]))
    .surface(RecordingSurface::new())
    .type_delay(Duration::from_millis(75))
    .build()
    .unwrap();
    let mut clock = ManualClock::new();
    seq.run(&mut clock, &CancelToken::new()).unwrap();

    assert_eq!(
        clock.waits(),
        &[Duration::from_millis(5), Duration::from_millis(5)]
    );
}

/// Tears itself down once a number of glyphs have been shown.
struct TearDownAfter {
    inner: RecordingSurface,
    limit: usize,
    cancel: CancelToken,
}

impl OutputSurface for TearDownAfter {
    fn insert(&mut self, glyph: Glyph) {
        self.inner.insert(glyph);
        if self.inner.glyphs().len() >= self.limit {
            self.cancel.cancel();
        }
    }

    fn remove(&mut self, glyph: Glyph) {
        self.inner.remove(glyph);
    }

    fn finish(&mut self, status: Status) {
        self.inner.finish(status);
    }
}

#[test]
fn cancellation_stops_at_the_next_suspension_point() {
    let cancel = CancelToken::new();
    let surface = TearDownAfter {
        inner: RecordingSurface::new(),
        limit: 3,
        cancel: cancel.clone(),
    };
    let mut seq = Sequencer::new(
        Script::new(vec![
            Operation::type_text("Hello"),
            Operation::type_text(" again"),
        ]),
        surface,
    )
    .unwrap();
    let mut clock = ManualClock::new();

    let outcome = seq.run(&mut clock, &cancel).unwrap();

    assert_eq!(outcome, RunOutcome::Cancelled);
    assert_eq!(seq.status(), Status::Cancelled);
    assert_eq!(seq.visible_text(), "Hel");
    assert_eq!(seq.cursor(), 0);
    assert_eq!(seq.executed(), 0);
    // Three reveals, three waits; the fourth wait was refused.
    assert_eq!(clock.waits().len(), 3);
    assert_eq!(seq.surface().inner.finished(), Some(Status::Cancelled));
}

#[test]
fn builder_and_sequencer_agree() {
    let mut builder = ScriptBuilder::new();
    let script = builder
        .pause_for(1000)
        .type_text("Hallo Welt")
        .pause_for(100)
        .change_delete_speed(5)
        .delete_chars(10)
        .change_delay(5)
        .type_text("世界您好！")
        .start()
        .unwrap();

    let mut seq = Sequencer::new(script.clone(), RecordingSurface::new()).unwrap();
    seq.run(&mut ManualClock::new(), &CancelToken::new()).unwrap();

    assert_eq!(seq.visible_text(), "世界您好！");
    assert_eq!(seq.buffer().len(), script.final_len().unwrap());
}
