use relief_core::ChunkedLineDecoder;

const BODY: &str = "data: {\"type\":\"status\",\"message\":\"Séisme près de Hualien 🌊\"}\n\n: ping\ndata: {\"type\":\"done\"}\nunterminated ✓";

fn expected_lines() -> Vec<String> {
    BODY.split('\n').map(ToOwned::to_owned).collect()
}

fn decode(chunks: &[&[u8]]) -> Vec<String> {
    let mut decoder = ChunkedLineDecoder::new();
    let mut lines = Vec::new();
    for chunk in chunks {
        lines.extend(decoder.feed(chunk));
    }
    lines.extend(decoder.finalize());
    lines
}

#[test]
fn whole_body_in_one_chunk() {
    assert_eq!(decode(&[BODY.as_bytes()]), expected_lines());
}

#[test]
fn every_two_way_split_reproduces_the_lines() {
    let bytes = BODY.as_bytes();
    for cut in 0..=bytes.len() {
        let (a, b) = bytes.split_at(cut);
        assert_eq!(decode(&[a, b]), expected_lines(), "split at {cut}");
    }
}

#[test]
fn every_three_way_split_reproduces_the_lines() {
    let bytes = BODY.as_bytes();
    for first in 0..=bytes.len() {
        for second in first..=bytes.len() {
            let chunks = [&bytes[..first], &bytes[first..second], &bytes[second..]];
            assert_eq!(
                decode(&chunks),
                expected_lines(),
                "splits at {first} and {second}"
            );
        }
    }
}

#[test]
fn byte_at_a_time_reproduces_the_lines() {
    let chunks: Vec<&[u8]> = BODY.as_bytes().chunks(1).collect();
    assert_eq!(decode(&chunks), expected_lines());
}

#[test]
fn no_replacement_character_for_split_sequences() {
    let chunks: Vec<&[u8]> = BODY.as_bytes().chunks(3).collect();
    let lines = decode(&chunks);
    assert!(lines.iter().all(|line| !line.contains('\u{FFFD}')));
}

#[test]
fn terminated_body_has_no_final_line() {
    let mut decoder = ChunkedLineDecoder::new();
    let lines = decoder.feed(b"data: {\"type\":\"done\"}\n\n");
    assert_eq!(lines, vec!["data: {\"type\":\"done\"}", ""]);
    assert_eq!(decoder.finalize(), None);
}
