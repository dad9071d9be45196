//! Voting and credibility engine
//!
//! Pure logic over a report's `(species, alternate_species)` pair. The
//! store runs it inside an optimistic read-modify-write; nothing here
//! touches the database or the catalog.

use crate::models::SpeciesVote;

/// Leading identification, the full candidate list, and the derived score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub species: SpeciesVote,
    pub alternate_species: Vec<SpeciesVote>,
    pub credibility: u8,
}

impl Tally {
    /// Tally for a freshly submitted report: one candidate, which leads
    pub fn open(initial: SpeciesVote) -> Self {
        let credibility = credibility(initial.votes, initial.votes);
        Self {
            alternate_species: vec![initial.clone()],
            species: initial,
            credibility,
        }
    }

    /// Rebuild a tally from stored candidates, keeping `incumbent` in the
    /// lead unless another candidate has strictly more votes
    ///
    /// Returns `None` when there are no candidates at all.
    pub fn rank(incumbent: Option<&str>, alternate_species: Vec<SpeciesVote>) -> Option<Self> {
        let leader = leading_candidate(incumbent, &alternate_species)?.clone();
        let total = total_votes(&alternate_species);
        Some(Self {
            credibility: credibility(leader.votes, total),
            species: leader,
            alternate_species,
        })
    }

    /// Record one vote for `suggested` and re-rank
    pub fn cast(&self, suggested: &str) -> Self {
        let mut alternates = self.alternate_species.clone();
        add_vote(&mut alternates, suggested);

        // add_vote guarantees at least one candidate
        let leader = leading_candidate(Some(self.species.species.as_str()), &alternates)
            .cloned()
            .unwrap_or_else(|| SpeciesVote::new(suggested, 1));
        let total = total_votes(&alternates);

        Self {
            credibility: credibility(leader.votes, total),
            species: leader,
            alternate_species: alternates,
        }
    }
}

/// Increment `suggested`'s count, appending it with one vote if new
pub fn add_vote(alternates: &mut Vec<SpeciesVote>, suggested: &str) {
    match alternates.iter_mut().find(|c| c.species == suggested) {
        Some(candidate) => candidate.votes = candidate.votes.saturating_add(1),
        None => alternates.push(SpeciesVote::new(suggested, 1)),
    }
}

/// Candidate with the most votes
///
/// Ties go to the incumbent when it holds the maximum, otherwise to the
/// earliest-inserted candidate holding it.
pub fn leading_candidate<'a>(
    incumbent: Option<&str>,
    alternates: &'a [SpeciesVote],
) -> Option<&'a SpeciesVote> {
    let max = alternates.iter().map(|c| c.votes).max()?;

    incumbent
        .and_then(|name| alternates.iter().find(|c| c.species == name && c.votes == max))
        .or_else(|| alternates.iter().find(|c| c.votes == max))
}

pub fn total_votes(alternates: &[SpeciesVote]) -> u64 {
    alternates.iter().map(|c| u64::from(c.votes)).sum()
}

/// Percentage of `total` held by the leader, rounded down; 0 when nothing was cast
pub fn credibility(leading_votes: impl Into<u64>, total: impl Into<u64>) -> u8 {
    let (leading, total) = (leading_votes.into(), total.into());
    if total == 0 {
        return 0;
    }
    (leading.min(total) * 100 / total) as u8
}
