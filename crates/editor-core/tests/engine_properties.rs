use std::io::Write;

use proptest::prelude::*;

fn small_config() -> editor_core::EngineConfig {
    editor_core::EngineConfig::default()
        .with_index_chunk_size(7)
        .with_index_stride(3)
        .with_parallel_search_threshold(16)
        .with_search_chunk_size(9)
        .with_worker_threads(2)
}

fn open_with(content: &[u8]) -> (tempfile::NamedTempFile, editor_core::Engine) {
    let mut temp = tempfile::NamedTempFile::new().unwrap();

    temp.write_all(content).unwrap();
    temp.as_file().sync_all().unwrap();

    let engine = editor_core::Engine::open_with_config(temp.path(), small_config()).unwrap();

    (temp, engine)
}

/// Lines of `text` the way the engine reads them: `\n`, `\r\n` and a lone
/// `\r` each end a line, and a trailing terminator does not start another.
fn model_lines(text: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut line = Vec::new();
    let mut bytes = text.iter().copied().peekable();

    while let Some(byte) = bytes.next() {
        match byte {
            b'\n' => lines.push(std::mem::take(&mut line)),
            b'\r' => {
                bytes.next_if_eq(&b'\n');
                lines.push(std::mem::take(&mut line));
            }
            _ => line.push(byte),
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

fn read_lines(block: &[u8]) -> Vec<Vec<u8>> {
    editor_core::query::block_lines(block).map(<[u8]>::to_vec).collect()
}

#[derive(Debug, Clone)]
struct EditOp {
    start: usize,
    deleted: usize,
    text: Vec<u8>,
}

fn line_strategy() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), Just(b' ')], 0..5)
}

fn terminator_strategy() -> impl Strategy<Value = &'static [u8]> {
    prop_oneof![
        3 => Just(&b"\n"[..]),
        2 => Just(&b"\r\n"[..]),
        2 => Just(&b"\r"[..]),
    ]
}

fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    (
        proptest::collection::vec((line_strategy(), terminator_strategy()), 0..4),
        any::<bool>(),
    )
        .prop_map(|(lines, trailing)| {
            let mut text = Vec::new();
            let last = lines.len().saturating_sub(1);

            for (i, (line, terminator)) in lines.iter().enumerate() {
                text.extend_from_slice(line);

                if i < last || trailing {
                    text.extend_from_slice(terminator);
                }
            }

            text
        })
}

fn edit_strategy() -> impl Strategy<Value = EditOp> {
    (0usize..30, 0usize..4, text_strategy()).prop_map(|(start, deleted, text)| EditOp {
        start,
        deleted,
        text,
    })
}

fn apply_to_model(model: &mut Vec<Vec<u8>>, op: &EditOp) {
    let start = op.start.min(model.len());
    let deleted = op.deleted.min(model.len() - start);

    model.splice(start..start + deleted, model_lines(&op.text));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn edits_match_line_model(initial in text_strategy(), ops in proptest::collection::vec(edit_strategy(), 0..12)) {
        let (_temp, mut engine) = open_with(&initial);
        let mut model = model_lines(&initial);

        prop_assert_eq!(engine.total_lines(), model.len());

        for op in &ops {
            engine.apply_edit(op.start, op.deleted, &op.text).unwrap();
            apply_to_model(&mut model, op);

            prop_assert_eq!(engine.total_lines(), model.len());
            prop_assert!(engine.verify());
        }

        let total = engine.total_lines();
        let first = engine.get_block(0, total).to_vec();
        let second = engine.get_block(0, total).to_vec();

        prop_assert_eq!(read_lines(&first), model);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn inserted_lines_read_back(initial in text_strategy(), at in 0usize..10, text in text_strategy()) {
        let (_temp, mut engine) = open_with(&initial);
        let at = at.min(engine.total_lines());
        let inserted = model_lines(&text);

        engine.apply_edit(at, 0, &text).unwrap();

        prop_assert_eq!(read_lines(engine.get_block(at, inserted.len())), inserted);
    }

    #[test]
    fn search_respects_direction(
        initial in text_strategy(),
        ops in proptest::collection::vec(edit_strategy(), 0..4),
        query in prop_oneof![Just(b"a".to_vec()), Just(b"ab".to_vec()), Just(b"c b".to_vec()), Just(b"bb".to_vec())],
        start in 0usize..20,
    ) {
        let (_temp, mut engine) = open_with(&initial);
        let mut model = model_lines(&initial);

        for op in &ops {
            engine.apply_edit(op.start, op.deleted, &op.text).unwrap();
            apply_to_model(&mut model, op);
        }

        let contains = |line: &Vec<u8>| line.windows(query.len()).any(|w| w == query.as_slice());
        let expected_forward = (start..model.len()).find(|&l| contains(&model[l]));
        let expected_backward = if model.is_empty() {
            None
        } else {
            (0..=start.min(model.len() - 1)).rev().find(|&l| contains(&model[l]))
        };

        prop_assert_eq!(engine.search(&query, start), expected_forward);
        prop_assert_eq!(engine.search_backward(&query, start), expected_backward);
        prop_assert_eq!(engine.search(b"a\r", 0), None);
    }

    #[test]
    fn save_round_trips(initial in text_strategy(), ops in proptest::collection::vec(edit_strategy(), 0..6)) {
        let (_temp, mut engine) = open_with(&initial);

        for op in &ops {
            engine.apply_edit(op.start, op.deleted, &op.text).unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("saved.txt");
        let total = engine.total_lines();
        let before = engine.get_block(0, total).to_vec();

        prop_assert!(engine.save(&target));

        let mut reopened = editor_core::Engine::open_with_config(&target, small_config()).unwrap();

        let saved = std::fs::read(&target).unwrap();

        prop_assert_eq!(reopened.total_lines(), total);
        prop_assert_eq!(reopened.get_block(0, total).to_vec(), before.clone());
        prop_assert_eq!(model_lines(&saved), read_lines(&before));
    }
}

#[test]
fn no_op_edit_is_idempotent() {
    let (_temp, mut engine) = open_with(b"alpha\nbeta\ngamma\ndelta\n");
    let before = engine.get_block(0, 4).to_vec();

    engine.apply_edit(2, 0, b"").unwrap();

    assert_eq!(engine.total_lines(), 4);
    assert_eq!(engine.get_block(0, 4), &before[..]);
    assert_eq!(engine.piece_count(), 1);
}

#[test]
fn crlf_file_round_trips_byte_for_byte() {
    let content = b"one\r\ntwo\r\nthree\r\n";
    let (temp, mut engine) = open_with(content);

    engine.apply_edit(1, 1, b"TWO\r\n").unwrap();
    engine.apply_edit(1, 1, b"two\r\n").unwrap();

    assert!(engine.save(temp.path()));
    assert_eq!(std::fs::read(temp.path()).unwrap(), content);
}

#[test]
fn large_file_window_queries() {
    let content: Vec<u8> = (0..20_000)
        .flat_map(|i| format!("record {i:05} payload\n").into_bytes())
        .collect();
    let (_temp, mut engine) = open_with(&content);

    assert_eq!(engine.total_lines(), 20_000);
    assert_eq!(engine.get_lines(12_345, 2), ["record 12345 payload", "record 12346 payload"]);

    engine.apply_edit(10_000, 5_000, b"gap").unwrap();

    assert_eq!(engine.total_lines(), 15_001);
    assert_eq!(engine.get_lines(9_999, 3), ["record 09999 payload", "gap", "record 15000 payload"]);
    assert_eq!(engine.search(b"record 17", 0), Some(12_001));
    assert_eq!(engine.search_backward(b"record 09", 15_000), Some(9_999));
    assert_eq!(engine.search(b"gap", 0), Some(10_000));
    assert!(engine.verify());
}
