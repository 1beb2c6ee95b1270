use serde::{Deserialize, Serialize};

/// Weights and thresholds for the structural complexity metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityConfig {
    #[serde(default = "default_element_weight")]
    pub element_weight: f64,
    #[serde(default = "default_gateway_weight")]
    pub gateway_weight: f64,
    #[serde(default = "default_task_weight")]
    pub task_weight: f64,
    /// Scores below this are `Low`.
    #[serde(default = "default_low_below")]
    pub low_below: f64,
    /// Scores below this (and not `Low`) are `Medium`.
    #[serde(default = "default_medium_below")]
    pub medium_below: f64,
    #[serde(default = "default_max_gateways")]
    pub max_gateways: usize,
    #[serde(default = "default_flow_complexity_cap")]
    pub flow_complexity_cap: usize,
    /// Process levels allowed, counting the process itself; one sub-process makes two.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    /// `&&`/`||`/`and`/`or` operators allowed in one condition expression.
    #[serde(default = "default_max_condition_operators")]
    pub max_condition_operators: usize,
    #[serde(default = "default_true")]
    pub flag_unnamed_elements: bool,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            element_weight: default_element_weight(),
            gateway_weight: default_gateway_weight(),
            task_weight: default_task_weight(),
            low_below: default_low_below(),
            medium_below: default_medium_below(),
            max_gateways: default_max_gateways(),
            flow_complexity_cap: default_flow_complexity_cap(),
            max_nesting_depth: default_max_nesting_depth(),
            max_condition_operators: default_max_condition_operators(),
            flag_unnamed_elements: true,
        }
    }
}

const fn default_element_weight() -> f64 { 0.5 }
const fn default_gateway_weight() -> f64 { 2.0 }
const fn default_task_weight() -> f64 { 1.0 }
const fn default_low_below() -> f64 { 10.0 }
const fn default_medium_below() -> f64 { 25.0 }
const fn default_max_gateways() -> usize { 5 }
const fn default_flow_complexity_cap() -> usize { 50 }
const fn default_max_nesting_depth() -> usize { 3 }
const fn default_max_condition_operators() -> usize { 3 }

/// Security score penalties, subtracted per vulnerability from `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_base")]
    pub base: u32,
    #[serde(default = "default_critical")]
    pub critical: u32,
    #[serde(default = "default_high")]
    pub high: u32,
    #[serde(default = "default_medium")]
    pub medium: u32,
    #[serde(default)]
    pub low: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            critical: default_critical(),
            high: default_high(),
            medium: default_medium(),
            low: 0,
        }
    }
}

const fn default_base() -> u32 { 100 }
const fn default_critical() -> u32 { 30 }
const fn default_high() -> u32 { 20 }
const fn default_medium() -> u32 { 10 }

/// Toggles and patterns for the built-in security rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default = "default_true")]
    pub unassigned_task: bool,
    #[serde(default = "default_true")]
    pub expression_injection: bool,
    #[serde(default = "default_true")]
    pub code_injection: bool,
    #[serde(default = "default_interpolation_markers")]
    pub interpolation_markers: Vec<String>,
    /// Names that count as eval-style when invoked (`eval(`, `eval.call(`, `['eval'](`).
    #[serde(default = "default_eval_tokens")]
    pub eval_tokens: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            unassigned_task: true,
            expression_injection: true,
            code_injection: true,
            interpolation_markers: default_interpolation_markers(),
            eval_tokens: default_eval_tokens(),
        }
    }
}

const fn default_true() -> bool { true }

fn default_interpolation_markers() -> Vec<String> {
    vec!["${".into(), "#{".into()]
}

fn default_eval_tokens() -> Vec<String> {
    vec!["eval".into(), "exec".into(), "execScript".into(), "Function".into()]
}

/// Grid placement for the visualization graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_origin")]
    pub origin_x: i64,
    #[serde(default = "default_origin")]
    pub origin_y: i64,
    #[serde(default = "default_cell_width")]
    pub cell_width: i64,
    #[serde(default = "default_cell_height")]
    pub cell_height: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            origin_x: default_origin(),
            origin_y: default_origin(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
        }
    }
}

const fn default_columns() -> usize { 3 }
const fn default_origin() -> i64 { 100 }
const fn default_cell_width() -> i64 { 200 }
const fn default_cell_height() -> i64 { 150 }

/// On-disk shape of `bpmnscope.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BpmnScopeToml {
    #[serde(default)]
    pub complexity: ComplexityConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub complexity: ComplexityConfig,
    pub scoring: ScoringConfig,
    pub rules: RuleConfig,
    pub layout: LayoutConfig,
}
