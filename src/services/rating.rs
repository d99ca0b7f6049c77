use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::config::settings::RatingSettings;
use crate::domain::{Action, Assessment, Match, MatchId, PlayerId, Season};
use crate::errors::StoreError;
use crate::rating::assessment::{self, AssessmentScores};
use crate::rating::{self, MprBreakdown, RatedAction, RatingValue, SeasonProfile};
use crate::store::EventSource;

/// One player's rating for one match, with the actions it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRating {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub mpr: RatingValue,
    pub breakdown: MprBreakdown,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedMatch {
    pub match_id: MatchId,
    pub date: NaiveDate,
    pub opponent: String,
    pub actions: usize,
    pub mpr: RatingValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRating {
    pub player_id: PlayerId,
    pub season: Season,
    pub csr: RatingValue,
    pub matches: Vec<RatedMatch>,
    pub profile: Option<SeasonProfile>,
}

/// A saved assessment with the scores derived from its inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAssessment {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub scores: AssessmentScores,
    /// Role-weighted score on the 0-10 rating scale
    pub rating: RatingValue,
}

impl ScoredAssessment {
    pub fn from_assessment(saved: Assessment) -> Result<Self> {
        let scores = assessment::score(&saved.inputs, saved.role).map_err(StoreError::from)?;
        Ok(Self {
            rating: assessment::to_rating_scale(scores.role_weighted),
            assessment: saved,
            scores,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentHistory {
    pub player_id: PlayerId,
    /// `None` when the whole history was requested
    pub season: Option<Season>,
    pub assessments: Vec<ScoredAssessment>,
    /// Count, average, peak, low and composite over `assessments`
    pub summary: Option<SeasonProfile>,
}

/// Reads rows for one request and hands them to the rating engine
pub struct RatingService<S: EventSource> {
    source: S,
    settings: RatingSettings,
}

impl<S: EventSource> RatingService<S> {
    pub fn new(source: S, settings: RatingSettings) -> Self {
        Self { source, settings }
    }

    pub fn match_rating(&self, player_id: PlayerId, match_id: MatchId) -> Result<MatchRating> {
        let actions = self.source.actions_for(player_id, match_id)?;
        let breakdown = rating::explain_mpr(&rated(&actions));
        debug!(
            "MPR {:.2} for player {} in match {} from {} actions",
            breakdown.mpr,
            player_id,
            match_id,
            actions.len()
        );

        Ok(MatchRating {
            player_id,
            match_id,
            mpr: breakdown.mpr,
            breakdown,
            actions,
        })
    }

    /// `season` defaults to the current one; `role_transfer` to the configured score
    pub fn season_rating(
        &self,
        player_id: PlayerId,
        season: Option<Season>,
        role_transfer: Option<f64>,
    ) -> Result<SeasonRating> {
        let season = match season {
            Some(season) => season,
            None => Season::current().ok_or_else(|| anyhow!("No season contains today's date"))?,
        };
        let role_transfer = role_transfer.unwrap_or(self.settings.default_role_transfer);

        let fixtures = self.source.matches_for_player(player_id, season)?;
        let matches = fixtures
            .into_iter()
            .map(|fixture| self.rate_fixture(player_id, fixture))
            .collect::<Result<Vec<_>>>()?;

        let mprs: Vec<RatingValue> = matches.iter().map(|m| m.mpr).collect();
        let csr = rating::compute_csr(&mprs);
        let profile = SeasonProfile::from_ratings(&mprs, role_transfer, &self.settings)
            .map_err(StoreError::from)?;
        debug!(
            "CSR {:.2} for player {} over {} matches in {}",
            csr,
            player_id,
            mprs.len(),
            season
        );

        Ok(SeasonRating {
            player_id,
            season,
            csr,
            matches,
            profile,
        })
    }

    /// Saved assessments scored on read, filtered by the day they were recorded
    pub fn assessment_history(
        &self,
        player_id: PlayerId,
        season: Option<Season>,
        role_transfer: Option<f64>,
    ) -> Result<AssessmentHistory> {
        let role_transfer = role_transfer.unwrap_or(self.settings.default_role_transfer);

        let assessments = self
            .source
            .assessments_for_player(player_id)?
            .into_iter()
            .filter(|a| season.map_or(true, |s| s.contains(a.recorded_at.date())))
            .map(ScoredAssessment::from_assessment)
            .collect::<Result<Vec<_>>>()?;

        let ratings: Vec<RatingValue> = assessments.iter().map(|a| a.rating).collect();
        let summary = SeasonProfile::from_ratings(&ratings, role_transfer, &self.settings)
            .map_err(StoreError::from)?;
        debug!(
            "Player {} has {} scored assessments",
            player_id,
            assessments.len()
        );

        Ok(AssessmentHistory {
            player_id,
            season,
            assessments,
            summary,
        })
    }

    fn rate_fixture(&self, player_id: PlayerId, fixture: Match) -> Result<RatedMatch> {
        let actions = self.source.actions_for(player_id, fixture.id)?;
        Ok(RatedMatch {
            match_id: fixture.id,
            date: fixture.date,
            opponent: fixture.opponent,
            actions: actions.len(),
            mpr: rating::compute_mpr(&rated(&actions)),
        })
    }
}

fn rated(actions: &[Action]) -> Vec<RatedAction> {
    actions.iter().map(RatedAction::from).collect()
}
