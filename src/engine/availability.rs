use super::{util, BlockAdvice, DateAvailability, Engine};

pub(super) fn availability(engine: &Engine) -> Vec<DateAvailability> {
    util::group_by_date(engine.shifts())
        .into_iter()
        .map(|(date, shifts)| {
            let mut worked: Vec<String> = Vec::new();
            for shift in shifts {
                if !worked.contains(&shift.workplace) {
                    worked.push(shift.workplace.clone());
                }
            }
            let blockable = engine
                .workplaces()
                .iter()
                .filter(|w| !worked.contains(w))
                .cloned()
                .collect();
            DateAvailability {
                date,
                worked,
                blockable,
            }
        })
        .collect()
}

/// Produit cartésien lieux bloquables × lieux travaillés, date par date.
pub(super) fn block_advice(engine: &Engine) -> Vec<BlockAdvice> {
    let mut out = Vec::new();
    for day in availability(engine) {
        for block in &day.blockable {
            for worked in &day.worked {
                out.push(BlockAdvice {
                    date: day.date,
                    worked: worked.clone(),
                    block: block.clone(),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_time, Shift};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn shift(workplace: &str, date: &str, start: &str, end: &str) -> Shift {
        Shift::new(workplace, d(date), parse_time(start).unwrap(), parse_time(end).unwrap(), None)
            .unwrap()
    }

    fn known(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn one_worked_place_blocks_every_other() {
        let engine = Engine::new(
            vec![shift("A", "2024-01-01", "09:00", "12:00")],
            known(&["A", "B", "C"]),
        )
        .unwrap();
        let advice = engine.block_advice();
        assert_eq!(advice.len(), 2);
        assert_eq!(advice[0].block, "B");
        assert_eq!(advice[1].block, "C");
        assert!(advice.iter().all(|a| a.worked == "A"));
        assert_eq!(
            advice[0].to_string(),
            "You are working at A on 2024-01-01 — block B on this day."
        );
    }

    #[test]
    fn several_worked_places_multiply_advice() {
        let engine = Engine::new(
            vec![
                shift("A", "2024-01-01", "09:00", "12:00"),
                shift("B", "2024-01-01", "13:00", "16:00"),
                shift("A", "2024-01-01", "17:00", "18:00"),
            ],
            known(&["A", "B", "C", "D"]),
        )
        .unwrap();
        let pairs: Vec<(String, String)> = engine
            .block_advice()
            .into_iter()
            .map(|a| (a.worked, a.block))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A".into(), "C".into()),
                ("B".into(), "C".into()),
                ("A".into(), "D".into()),
                ("B".into(), "D".into()),
            ]
        );
    }

    #[test]
    fn fully_worked_day_emits_nothing() {
        let engine = Engine::new(
            vec![
                shift("A", "2024-01-02", "09:00", "12:00"),
                shift("B", "2024-01-02", "13:00", "16:00"),
                shift("A", "2024-01-01", "09:00", "12:00"),
            ],
            known(&["A", "B"]),
        )
        .unwrap();
        let days = engine.availability();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, d("2024-01-01"));
        assert_eq!(days[0].blockable, vec!["B"]);
        assert!(days[1].blockable.is_empty());

        let advice = engine.block_advice();
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].date, d("2024-01-01"));
    }

    #[test]
    fn unknown_worked_place_still_gets_advice() {
        let engine = Engine::new(
            vec![shift("Gig", "2024-01-01", "09:00", "12:00")],
            known(&["A"]),
        )
        .unwrap();
        let advice = engine.block_advice();
        assert_eq!(advice.len(), 1);
        assert_eq!((advice[0].worked.as_str(), advice[0].block.as_str()), ("Gig", "A"));
    }

    #[test]
    fn no_shifts_no_advice() {
        let engine = Engine::new(vec![], known(&["A", "B"])).unwrap();
        assert!(engine.availability().is_empty());
        assert!(engine.block_advice().is_empty());
    }
}
