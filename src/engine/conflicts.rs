use super::{util, Conflict, Engine};

pub(super) fn detect_conflicts(engine: &Engine) -> Vec<Conflict> {
    let mut out = Vec::new();

    // comparaison par paires limitée aux shifts d'une même date
    for (date, shifts) in util::group_by_date(engine.shifts()) {
        for (idx, a) in shifts.iter().enumerate() {
            for b in shifts.iter().skip(idx + 1) {
                if util::overlaps(a.start_time, a.end_time, b.start_time, b.end_time) {
                    out.push(Conflict {
                        date,
                        shift_a: (*a).clone(),
                        shift_b: (*b).clone(),
                        overlap_start: a.start_time.max(b.start_time),
                        overlap_end: a.end_time.min(b.end_time),
                    });
                }
            }
        }
    }

    out
}
