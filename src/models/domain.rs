use serde::{Deserialize, Serialize};

/// Profile requesting a referral (a student or recent graduate)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seeker {
    #[serde(default, alias = "student_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub target_companies: Vec<String>,
    #[serde(default)]
    pub target_roles: Vec<String>,
}

/// Profile that can provide a referral (an alumnus)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, alias = "alumni_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_company: String,
    #[serde(default)]
    pub current_role: String,
    #[serde(default)]
    pub years_of_experience: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub industry: String,
    #[serde(default = "default_true")]
    pub willing_to_refer: bool,
    #[serde(default = "default_capacity", alias = "max_referrals_per_month")]
    pub monthly_referral_capacity: i32,
    #[serde(default, alias = "referral_count_this_month")]
    pub referrals_used_this_month: i32,
    #[serde(default)]
    pub contact_preferences: ContactPreferences,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub major: Option<String>,
}

impl Candidate {
    /// True while the monthly referral budget is not exhausted
    pub fn has_capacity(&self) -> bool {
        self.referrals_used_this_month < self.monthly_referral_capacity
    }

    pub fn has_linkedin(&self) -> bool {
        self.linkedin_url.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Lower-cased current role, used by title keyword lookups
    pub fn role_lower(&self) -> String {
        self.current_role.trim().to_lowercase()
    }
}

impl Default for Candidate {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            current_company: String::new(),
            current_role: String::new(),
            years_of_experience: 0,
            skills: vec![],
            industry: String::new(),
            willing_to_refer: true,
            monthly_referral_capacity: default_capacity(),
            referrals_used_this_month: 0,
            contact_preferences: ContactPreferences::default(),
            linkedin_url: None,
            email: None,
            graduation_year: None,
            major: None,
        }
    }
}

fn default_true() -> bool { true }
fn default_capacity() -> i32 { 3 }

/// How a candidate prefers to be approached
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPreferences {
    #[serde(default, alias = "preferred_method")]
    pub method: ContactMethod,
    #[serde(default)]
    pub response_time: Option<ResponseWindow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Linkedin,
    Email,
    #[default]
    Any,
}

/// Expected time until a contact answers an outreach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseWindow {
    #[serde(rename = "1-3 days")]
    OneToThreeDays,
    #[serde(rename = "2-5 days")]
    TwoToFiveDays,
    #[serde(rename = "3-7 days")]
    ThreeToSevenDays,
}

impl ResponseWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseWindow::OneToThreeDays => "1-3 days",
            ResponseWindow::TwoToFiveDays => "2-5 days",
            ResponseWindow::ThreeToSevenDays => "3-7 days",
        }
    }
}

impl std::fmt::Display for ResponseWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
