use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// Split text into batches that respect sentence boundaries.
/// Each batch is at most `max_batch_size` bytes and never empty.
pub fn split_into_batches(text: &str, max_batch_size: usize) -> Vec<String> {
    if text.len() <= max_batch_size {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();

    for sentence in sentences(text) {
        for piece in hard_split(sentence, max_batch_size) {
            if !current_batch.is_empty() && current_batch.len() + piece.len() > max_batch_size {
                push_batch(&mut batches, &current_batch);
                current_batch.clear();
            }
            current_batch.push_str(piece);
        }
    }

    push_batch(&mut batches, &current_batch);

    batches
}

/// Sentences including their trailing punctuation and whitespace
fn sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut last_end = 0;

    for mat in SENTENCE_END.find_iter(text) {
        result.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        result.push(&text[last_end..]);
    }

    result
}

/// Cut an oversized sentence on char boundaries
fn hard_split(sentence: &str, max_batch_size: usize) -> Vec<&str> {
    if sentence.len() <= max_batch_size {
        return vec![sentence];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (index, ch) in sentence.char_indices() {
        if index + ch.len_utf8() - start > max_batch_size {
            pieces.push(&sentence[start..index]);
            start = index;
        }
    }
    pieces.push(&sentence[start..]);

    pieces
}

fn push_batch(batches: &mut Vec<String>, batch: &str) {
    let trimmed = batch.trim();
    if !trimmed.is_empty() {
        batches.push(trimmed.to_string());
    }
}
