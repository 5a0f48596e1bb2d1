//! Scoring for try-directory names: fuzzy subsequence match quality plus
//! date-token and recency bonuses. Higher is better; a non-empty query that
//! is not a subsequence of the name scores zero and filters the name out.

/// Rank a name against a query and its directory timestamps.
///
/// Pure in all inputs; `now` is passed in so callers and tests control the
/// clock. Timestamps are seconds since the epoch, zero meaning unknown.
pub fn score(name: &str, query: &str, created_at: f64, modified_at: f64, now: f64) -> f64 {
    let mut score = 0.0;

    // Canonical YYYY-MM-DD- prefix earns a flat bonus, query or not.
    if has_date_token(name) {
        score += 2.0;
    }

    if !query.is_empty() {
        let name_chars: Vec<char> = name.to_lowercase().chars().collect();
        let query_chars: Vec<char> = query.to_lowercase().chars().collect();
        let mut last_pos: Option<usize> = None;
        let mut qidx = 0;

        for (pos, &ch) in name_chars.iter().enumerate() {
            if qidx >= query_chars.len() {
                break;
            }
            if ch != query_chars[qidx] {
                continue;
            }
            score += 1.0;
            // Matches that start the name or a word count extra.
            if pos == 0 || !name_chars[pos - 1].is_ascii_alphanumeric() {
                score += 1.0;
            }
            // Adjacent matches earn a full point; the bonus decays with the
            // gap since the previous match.
            if let Some(last) = last_pos {
                let gap = (pos - last - 1) as f64;
                score += 1.0 / (gap + 1.0).sqrt();
            }
            last_pos = Some(pos);
            qidx += 1;
        }

        if qidx < query_chars.len() {
            return 0.0;
        }
        if let Some(last) = last_pos {
            score *= query_chars.len() as f64 / (last as f64 + 1.0);
        }
        score *= 10.0 / (name_chars.len() as f64 + 10.0);
    }

    if created_at > 0.0 {
        let age_days = (now - created_at) / 86_400.0;
        score += 2.0 / (age_days + 1.0).sqrt();
    }
    if modified_at > 0.0 {
        let age_hours = (now - modified_at) / 3_600.0;
        score += 3.0 / (age_hours + 1.0).sqrt();
    }

    score
}

/// Char positions in `name` consumed by a greedy left-to-right subsequence
/// walk of `query`, for highlighting. The walk is the same alignment the
/// scorer uses; if the query cannot be fully consumed the positions matched
/// so far are still returned.
pub fn match_positions(name: &str, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let query_chars: Vec<char> = query.to_lowercase().chars().collect();
    let mut positions = Vec::with_capacity(query_chars.len());
    let mut qidx = 0;
    for (pos, ch) in name.to_lowercase().chars().enumerate() {
        if qidx >= query_chars.len() {
            break;
        }
        if ch == query_chars[qidx] {
            positions.push(pos);
            qidx += 1;
        }
    }
    positions
}

/// Collapse sorted positions into `(start, end)` char ranges, end exclusive.
pub fn positions_to_ranges(positions: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &pos in positions {
        match ranges.last_mut() {
            Some((_, end)) if *end == pos => *end = pos + 1,
            _ => ranges.push((pos, pos + 1)),
        }
    }
    ranges
}

/// Split a `YYYY-MM-DD-name` basename into its date and name parts.
pub fn split_date_name(name: &str) -> Option<(&str, &str)> {
    let bytes = name.as_bytes();
    if bytes.len() >= 11
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[10] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
    {
        // Bytes 4, 7, and 10 are ASCII, so 10 and 11 are char boundaries.
        Some((&name[..10], &name[11..]))
    } else {
        None
    }
}

pub fn has_date_token(name: &str) -> bool {
    split_date_name(name).is_some()
}
