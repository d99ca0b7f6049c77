//! Decision-point grading: an alternative to typed action logging.
//!
//! A coach grades each meaningful decision point on five 1-10 scales. The
//! grades fold into a contextual action value (CAV), the CAVs into match
//! aggregates, and the aggregates into a role-neutral and a role-weighted
//! score on a 0-100 scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::Position;
use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BuildUp,
    FinalThird,
    AttackingTransition,
    DefensiveTransition,
    SetPiece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeType {
    #[default]
    None,
    /// Wrong decision
    Decision,
    /// Right decision, failed execution
    Execution,
    /// Error forced by the context
    Forced,
}

impl MistakeType {
    pub fn cap(&self) -> f64 {
        match self {
            MistakeType::None => 10.0,
            MistakeType::Decision => 4.0,
            MistakeType::Execution => 8.3,
            MistakeType::Forced => 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPoint {
    pub phase: Phase,
    /// Decision quality
    pub dq: f64,
    /// Execution quality
    pub eq: f64,
    /// Contextual difficulty
    pub cd: f64,
    /// Tactical alignment
    pub ta: f64,
    /// Level of pressure
    pub lop: f64,
    #[serde(default)]
    pub mistake: MistakeType,
}

impl DecisionPoint {
    /// `min((2*DQ + 2*EQ + 1.5*CD + 1.5*TA + LOP) / 8, cap(mistake))`
    pub fn cav(&self) -> f64 {
        let raw = (2.0 * self.dq + 2.0 * self.eq + 1.5 * self.cd + 1.5 * self.ta + self.lop) / 8.0;
        raw.min(self.mistake.cap())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("dq", self.dq),
            ("eq", self.eq),
            ("cd", self.cd),
            ("ta", self.ta),
            ("lop", self.lop),
        ] {
            check_range(field, value, 1.0, 10.0)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAggregates {
    pub points: usize,
    /// Average quality of choices, mean CAV (1-10)
    pub aqc: f64,
    /// High-impact share, fraction of points with CAV at or above the threshold
    pub his: f64,
    /// Execution consistency estimate from the CAV spread (0-1)
    pub ec: f64,
}

/// `None` when no points were graded
pub fn aggregate(points: &[DecisionPoint], high_impact_cav: f64) -> Option<MatchAggregates> {
    if points.is_empty() {
        return None;
    }

    let cavs: Vec<f64> = points.iter().map(DecisionPoint::cav).collect();
    let n = cavs.len() as f64;
    let aqc = cavs.iter().sum::<f64>() / n;
    let his = cavs.iter().filter(|&&cav| cav >= high_impact_cav).count() as f64 / n;

    let ec = if cavs.len() > 1 {
        let variance = cavs.iter().map(|cav| (cav - aqc).powi(2)).sum::<f64>() / (n - 1.0);
        (1.0 - variance.sqrt() / 5.0).clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some(MatchAggregates {
        points: points.len(),
        aqc,
        his,
        ec,
    })
}

/// Roles with a weighting preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Role {
    Striker,
    Winger,
    AttackingMid,
    CentralMid,
    DefensiveMid,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Striker,
        Role::Winger,
        Role::AttackingMid,
        Role::CentralMid,
        Role::DefensiveMid,
    ];

    pub fn as_str(&self) -> &'static str {
        self.position().as_str()
    }

    pub fn label(&self) -> &'static str {
        self.position().label()
    }

    fn position(&self) -> Position {
        match self {
            Role::Striker => Position::Striker,
            Role::Winger => Position::Winger,
            Role::AttackingMid => Position::AttackingMid,
            Role::CentralMid => Position::CentralMid,
            Role::DefensiveMid => Position::DefensiveMid,
        }
    }

    pub fn weights(&self) -> RoleWeights {
        match self {
            Role::Striker => RoleWeights::new(0.15, 0.35, 0.10, 0.10, 0.30),
            Role::Winger => RoleWeights::new(0.20, 0.30, 0.15, 0.10, 0.25),
            Role::AttackingMid => RoleWeights::new(0.25, 0.25, 0.15, 0.15, 0.20),
            Role::CentralMid => RoleWeights::new(0.30, 0.15, 0.30, 0.20, 0.05),
            Role::DefensiveMid => RoleWeights::new(0.35, 0.10, 0.35, 0.25, 0.00),
        }
    }

    pub fn for_position(position: Position) -> Option<Self> {
        match position {
            Position::Striker => Some(Role::Striker),
            Position::Winger => Some(Role::Winger),
            Position::AttackingMid => Some(Role::AttackingMid),
            Position::CentralMid => Some(Role::CentralMid),
            Position::DefensiveMid => Some(Role::DefensiveMid),
            _ => None,
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Position>()
            .ok()
            .and_then(Role::for_position)
            .ok_or_else(|| ValidationError::new("role", format!("no weighting preset for '{}'", s)))
    }
}

impl TryFrom<String> for Role {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleWeights {
    pub aqc: f64,
    pub his: f64,
    pub ec: f64,
    pub tii: f64,
    pub ibi: f64,
}

impl RoleWeights {
    const fn new(aqc: f64, his: f64, ec: f64, tii: f64, ibi: f64) -> Self {
        Self { aqc, his, ec, tii, ibi }
    }
}

/// Metric inputs. AQC is 1-10; HIS, EC, TII and IBI are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInputs {
    pub aqc: f64,
    pub his: f64,
    pub ec: f64,
    #[serde(default)]
    pub tii: f64,
    #[serde(default)]
    pub ibi: f64,
    /// Stability modifier, capped at +8%
    #[serde(default = "neutral_multiplier")]
    pub sci: f64,
    /// Outcome multiplier
    #[serde(default = "neutral_multiplier")]
    pub om: f64,
    /// Presence index
    #[serde(default = "neutral_multiplier")]
    pub pi: f64,
}

fn neutral_multiplier() -> f64 {
    1.0
}

impl PerformanceInputs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("aqc", self.aqc, 1.0, 10.0)?;
        check_range("his", self.his, 0.0, 100.0)?;
        check_range("ec", self.ec, 0.0, 100.0)?;
        check_range("tii", self.tii, 0.0, 100.0)?;
        check_range("ibi", self.ibi, 0.0, 100.0)?;
        check_range("sci", self.sci, 1.0, 1.08)?;
        check_range("om", self.om, 0.5, 1.5)?;
        check_range("pi", self.pi, 0.5, 1.5)?;
        Ok(())
    }

    fn multiplier(&self) -> f64 {
        self.om * self.pi
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributions {
    pub aqc: f64,
    pub his: f64,
    pub ec: f64,
    pub tii: f64,
    pub ibi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScores {
    pub role: Role,
    pub role_neutral: f64,
    pub role_weighted: f64,
    /// Weighted components before the outcome and presence multipliers
    pub contributions: Contributions,
}

/// `(60*AQC/10 + 15*HIS/100 + 10*(EC/100*SCI) + 8*TII/100 + 6*IBI/100) * OM * PI`
pub fn role_neutral_score(inputs: &PerformanceInputs) -> f64 {
    let base = 60.0 * (inputs.aqc / 10.0)
        + 15.0 * (inputs.his / 100.0)
        + 10.0 * (inputs.ec / 100.0 * inputs.sci)
        + 8.0 * (inputs.tii / 100.0)
        + 6.0 * (inputs.ibi / 100.0);
    base * inputs.multiplier()
}

pub fn role_weighted_contributions(inputs: &PerformanceInputs, role: Role) -> Contributions {
    let w = role.weights();
    Contributions {
        aqc: w.aqc * inputs.aqc * 10.0,
        his: w.his * inputs.his,
        ec: w.ec * inputs.ec * inputs.sci,
        tii: w.tii * inputs.tii,
        ibi: w.ibi * inputs.ibi,
    }
}

pub fn score(inputs: &PerformanceInputs, role: Role) -> Result<AssessmentScores, ValidationError> {
    inputs.validate()?;
    let contributions = role_weighted_contributions(inputs, role);
    let weighted_sum =
        contributions.aqc + contributions.his + contributions.ec + contributions.tii + contributions.ibi;

    Ok(AssessmentScores {
        role,
        role_neutral: role_neutral_score(inputs),
        role_weighted: weighted_sum * inputs.multiplier(),
        contributions,
    })
}

/// Map a 0-100 assessment score onto the 0-10 rating scale
pub fn to_rating_scale(score: f64) -> f64 {
    (score / 10.0).clamp(0.0, 10.0)
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(grade: f64, mistake: MistakeType) -> DecisionPoint {
        DecisionPoint {
            phase: Phase::BuildUp,
            dq: grade,
            eq: grade,
            cd: grade,
            ta: grade,
            lop: grade,
            mistake,
        }
    }

    fn inputs() -> PerformanceInputs {
        PerformanceInputs {
            aqc: 7.0,
            his: 40.0,
            ec: 80.0,
            tii: 50.0,
            ibi: 30.0,
            sci: 1.0,
            om: 1.0,
            pi: 1.0,
        }
    }

    #[test]
    fn cav_weights_decision_and_execution_double() {
        let p = DecisionPoint {
            phase: Phase::FinalThird,
            dq: 8.0,
            eq: 6.0,
            cd: 4.0,
            ta: 6.0,
            lop: 5.0,
            mistake: MistakeType::None,
        };
        // (16 + 12 + 6 + 9 + 5) / 8
        assert_eq!(p.cav(), 6.0);
    }

    #[test]
    fn mistakes_cap_the_cav() {
        assert_eq!(point(9.0, MistakeType::None).cav(), 9.0);
        assert_eq!(point(9.0, MistakeType::Decision).cav(), 4.0);
        assert_eq!(point(9.0, MistakeType::Execution).cav(), 8.3);
        assert_eq!(point(9.0, MistakeType::Forced).cav(), 7.0);
        // below the cap the raw value stands
        assert_eq!(point(3.0, MistakeType::Decision).cav(), 3.0);
    }

    #[test]
    fn aggregates_follow_cav_distribution() {
        let points = [
            point(8.0, MistakeType::None),
            point(6.0, MistakeType::None),
            point(7.0, MistakeType::None),
        ];
        let agg = aggregate(&points, 7.0).unwrap();

        assert_eq!(agg.points, 3);
        assert_eq!(agg.aqc, 7.0);
        assert!((agg.his - 2.0 / 3.0).abs() < 1e-12);
        // sample std of 8, 6, 7 is 1
        assert!((agg.ec - 0.8).abs() < 1e-12);
    }

    #[test]
    fn single_point_is_perfectly_consistent() {
        let agg = aggregate(&[point(5.0, MistakeType::None)], 7.0).unwrap();
        assert_eq!(agg.ec, 1.0);
        assert_eq!(agg.his, 0.0);
        assert!(aggregate(&[], 7.0).is_none());
    }

    #[test]
    fn role_neutral_score_uses_fractional_components() {
        // 42 + 6 + 8 + 4 + 1.8
        assert!((role_neutral_score(&inputs()) - 61.8).abs() < 1e-9);
    }

    #[test]
    fn role_weighted_score_for_central_midfielder() {
        let scores = score(&inputs(), Role::CentralMid).unwrap();
        // 0.30*70 + 0.15*40 + 0.30*80 + 0.20*50 + 0.05*30
        assert!((scores.role_weighted - 62.5).abs() < 1e-9);
        assert!((scores.contributions.ec - 24.0).abs() < 1e-9);
        assert!((scores.role_neutral - 61.8).abs() < 1e-9);
    }

    #[test]
    fn multipliers_scale_both_scores() {
        let boosted = PerformanceInputs {
            om: 1.5,
            pi: 1.2,
            ..inputs()
        };
        let base = score(&inputs(), Role::Striker).unwrap();
        let scaled = score(&boosted, Role::Striker).unwrap();
        assert!((scaled.role_weighted - base.role_weighted * 1.8).abs() < 1e-9);
        assert!((scaled.role_neutral - base.role_neutral * 1.8).abs() < 1e-9);
    }

    #[test]
    fn defensive_mid_ignores_individual_brilliance() {
        let more_flair = PerformanceInputs {
            ibi: 100.0,
            ..inputs()
        };
        let a = score(&inputs(), Role::DefensiveMid).unwrap();
        let b = score(&more_flair, Role::DefensiveMid).unwrap();
        assert_eq!(a.role_weighted, b.role_weighted);
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        let bad = PerformanceInputs { sci: 1.2, ..inputs() };
        assert_eq!(score(&bad, Role::Winger).unwrap_err().field, "sci");
        assert!(point(0.5, MistakeType::None).validate().is_err());
        assert!(point(5.0, MistakeType::None).validate().is_ok());
    }

    #[test]
    fn scores_fold_onto_the_rating_scale() {
        assert_eq!(to_rating_scale(62.5), 6.25);
        // multipliers can push a score past 100
        assert_eq!(to_rating_scale(135.0), 10.0);
        assert_eq!(to_rating_scale(0.0), 0.0);
    }

    #[test]
    fn roles_parse_from_preset_labels() {
        assert_eq!("AM / 10".parse::<Role>().unwrap(), Role::AttackingMid);
        assert_eq!("defensive_mid".parse::<Role>().unwrap(), Role::DefensiveMid);
        assert_eq!(serde_json::from_str::<Role>(r#""CF / Striker""#).unwrap(), Role::Striker);
        assert_eq!(serde_json::to_value(Role::CentralMid).unwrap(), "central_mid");
        assert_eq!("gk".parse::<Role>().unwrap_err().field, "role");
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn omitted_inputs_default_to_neutral() {
        let inputs: PerformanceInputs =
            serde_json::from_str(r#"{"aqc": 6.5, "his": 20, "ec": 70}"#).unwrap();
        assert_eq!(inputs.tii, 0.0);
        assert_eq!(inputs.om, 1.0);
        assert_eq!(inputs.sci, 1.0);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn only_outfield_creative_positions_have_presets() {
        assert_eq!(Role::for_position(Position::Winger), Some(Role::Winger));
        assert_eq!(Role::for_position(Position::Goalkeeper), None);
    }
}
