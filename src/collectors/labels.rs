//! Label matcher for the block-formatted AIX listings (`lsvg <vg>`,
//! `lspv <pv>`, `lslv <lv>`, `lsmpio -ql <pv>`), which print two
//! `LABEL:  value` cells per line.
//!
//! A table maps every label the command can print to a setter. Labels that
//! carry nothing we need still belong in the table with [`ignore`]: they mark
//! where the previous cell ends and they shadow shorter labels nested inside
//! them (`LVs:` in `MAX LVs:`).

pub type Setter<T> = fn(&mut T, &str);

/// Run every line of `text` through `table`, calling setters on `target`.
pub fn apply<T>(table: &[(&str, Setter<T>)], text: &str, target: &mut T) {
    for line in text.lines() {
        for (idx, value) in match_line(line, table) {
            (table[idx].1)(target, value);
        }
    }
}

/// Locate the labels on one line and slice out each value.
/// Returns (table index, value) in left-to-right order.
pub fn match_line<'a, T>(line: &'a str, table: &[(&str, Setter<T>)]) -> Vec<(usize, &'a str)> {
    let mut hits: Vec<(usize, usize, usize)> = Vec::new(); // (start, end, table idx)
    for (idx, (label, _)) in table.iter().enumerate() {
        for (start, _) in line.match_indices(label) {
            let at_boundary = line[..start].chars().next_back().map_or(true, char::is_whitespace);
            if at_boundary {
                hits.push((start, start + label.len(), idx));
            }
        }
    }

    // drop a hit swallowed by a longer label at the same spot
    let all = hits.clone();
    hits.retain(|&(s, e, _)| {
        !all.iter().any(|&(os, oe, _)| os <= s && oe >= e && (oe - os) > (e - s))
    });
    hits.sort_by_key(|&(s, _, _)| s);

    let mut out = Vec::with_capacity(hits.len());
    for (i, &(_, end, idx)) in hits.iter().enumerate() {
        let stop = hits.get(i + 1).map_or(line.len(), |&(s, _, _)| s);
        if stop >= end {
            out.push((idx, line[end..stop].trim()));
        }
    }
    out
}

/// First whitespace-delimited token of a value: "799 (51136 megabytes)" → "799".
pub fn first_token(v: &str) -> &str {
    v.split_whitespace().next().unwrap_or("")
}

/// A value up to the next wide gap, for cells whose neighbour label is unknown.
pub fn cell(v: &str) -> &str {
    v.split("  ").next().unwrap_or("").trim()
}

pub fn number(v: &str) -> u64 {
    first_token(v).parse().unwrap_or(0)
}

pub fn ignore<T>(_: &mut T, _: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug)]
    struct Fields {
        lvs:       u64,
        max_lvs:   u64,
        free:      u64,
        quorum:    String,
        state:     String,
    }

    const TABLE: &[(&str, Setter<Fields>)] = &[
        ("MAX LVs:",  |p: &mut Fields, v: &str| p.max_lvs = number(v)),
        ("OPEN LVs:", ignore),
        ("LVs:",      |p: &mut Fields, v: &str| p.lvs = number(v)),
        ("FREE PPs:", |p: &mut Fields, v: &str| p.free = number(v)),
        ("USED PPs:", ignore),
        ("QUORUM:",   |p: &mut Fields, v: &str| p.quorum = cell(v).to_string()),
        ("VG STATE:", |p: &mut Fields, v: &str| p.state = first_token(v).to_string()),
        ("PP SIZE:",  ignore),
    ];

    #[test]
    fn nested_labels_do_not_shadow_each_other() {
        let mut p = Fields::default();
        apply(TABLE, "MAX LVs:            256                      FREE PPs:       560 (35840 megabytes)\n\
                      LVs:                13                       USED PPs:       239 (15296 megabytes)\n\
                      OPEN LVs:           12                       QUORUM:         2 (Enabled)\n", &mut p);
        assert_eq!(p.max_lvs, 256);
        assert_eq!(p.lvs, 13);
        assert_eq!(p.free, 560);
        assert_eq!(p.quorum, "2 (Enabled)");
    }

    #[test]
    fn value_stops_at_next_label_on_same_line() {
        let hits = match_line("VG STATE:           active                   PP SIZE:        64 megabyte(s)", TABLE);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].1, "active");
        assert_eq!(hits[1].1, "64 megabyte(s)");
    }

    #[test]
    fn label_inside_a_word_is_not_a_label() {
        let hits = match_line("XFREE PPs: 3", TABLE);
        assert!(hits.is_empty());
    }

    #[test]
    fn unknown_lines_are_ignored() {
        let mut p = Fields::default();
        apply(TABLE, "garbage line\n\n   \nVG STATE:", &mut p);
        assert_eq!(p.state, "");
        assert_eq!(p.lvs, 0);
    }

    #[test]
    fn cell_cuts_at_wide_gap() {
        assert_eq!(cell("opened/syncd     WRITE VERIFY:   off"), "opened/syncd");
        assert_eq!(cell("2 (Enabled)"), "2 (Enabled)");
    }
}
