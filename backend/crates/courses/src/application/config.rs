//! Application Configuration

/// Course application configuration
#[derive(Debug, Clone)]
pub struct CourseConfig {
    /// Number of concepts a course is divided into
    pub total_concepts: u32,
    /// Points awarded per newly completed concept
    pub points_per_concept: i64,
    /// Icon used when the client does not send one
    pub default_icon: String,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            total_concepts: 12,
            points_per_concept: 50,
            default_icon: "📚".to_string(),
        }
    }
}
