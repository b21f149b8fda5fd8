use crate::fitness::rank_key;
use crate::pop_member::PopMember;

#[derive(Clone, Debug, Default)]
pub struct Population {
    pub members: Vec<PopMember>,
}

impl Population {
    pub fn new(members: Vec<PopMember>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Stable sort by ascending score; NaN scores go last.
    pub fn rank(&mut self) {
        self.members
            .sort_by(|a, b| rank_key(a.score).total_cmp(&rank_key(b.score)));
    }

    pub fn is_ranked(&self) -> bool {
        self.members
            .windows(2)
            .all(|w| rank_key(w[0].score) <= rank_key(w[1].score))
    }

    /// The first member; the best one once ranked.
    pub fn best(&self) -> Option<&PopMember> {
        self.members.first()
    }

    /// Replace the weakest of the first `kept` members with `migrants`.
    ///
    /// The best member is never replaced, so at most `kept - 1` slots are
    /// used; migrants beyond that are dropped. Returns how many were placed.
    pub fn replace_weakest(&mut self, kept: usize, migrants: impl IntoIterator<Item = PopMember>) -> usize {
        let kept = kept.min(self.members.len());
        let mut slot = kept;
        let mut placed = 0;
        for migrant in migrants {
            if slot <= 1 {
                break;
            }
            slot -= 1;
            self.members[slot] = migrant;
            placed += 1;
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use immune_expressions::{Expression, Node};

    use super::*;

    fn member(v: f64, score: f64) -> PopMember {
        PopMember::new(Expression::new(Node::number(v), Vec::new()), score)
    }

    #[test]
    fn ranking_is_stable_and_puts_nan_last() {
        let mut pop = Population::new(vec![
            member(0.0, f64::NAN),
            member(1.0, 2.0),
            member(2.0, 1.0),
            member(3.0, 2.0),
        ]);
        pop.rank();
        let order: Vec<f64> = pop.members.iter().map(|m| m.expr.root.value().unwrap()).collect();
        assert_eq!(order, [2.0, 1.0, 3.0, 0.0]);
        assert!(pop.is_ranked());
    }

    #[test]
    fn replace_weakest_never_touches_the_best() {
        let mut pop = Population::new((0..4).map(|i| member(i as f64, i as f64)).collect());
        let placed = pop.replace_weakest(3, (10..20).map(|i| member(i as f64, 0.5)));
        assert_eq!(placed, 2);
        let order: Vec<f64> = pop.members.iter().map(|m| m.expr.root.value().unwrap()).collect();
        assert_eq!(order, [0.0, 11.0, 10.0, 3.0]);
    }
}
