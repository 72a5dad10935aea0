use std::collections::BTreeMap;

use serde_json::Value;

use form_autofill::profile::profile_model::{
    CoverLetter, CvData, JobInfo, PersonalInfo, UserData, UserRecord,
};

/// A job application page: one real form, one form with nothing to fill and a
/// search box outside any form.
pub const APPLICATION_PAGE: &str = r#"
<html>
<head><title>Apply - Backend Engineer</title></head>
<body>
  <header class="top">
    <input type="search" name="q" placeholder="Search jobs">
  </header>
  <form id="apply" action="/apply" method="POST">
    <label for="first">First Name *</label>
    <input id="first" name="first_name" type="text" required>

    <label for="last">Last Name *</label>
    <input id="last" name="last_name" type="text">

    <label>Email <input name="email_address" type="email" required></label>

    <label>Phone (optional)</label>
    <input name="phone" type="tel" required>

    <input type="hidden" name="token" value="abc">
    <div style="display: none"><input name="honeypot" type="text"></div>

    <label for="resume">Resume/CV</label>
    <input id="resume" type="file" required>

    <label for="sponsor">Do you require visa sponsorship?</label>
    <input id="sponsor" type="checkbox" name="needs_sponsor">

    <select name="country"><option value="US">United States</option></select>

    <textarea id="cover" placeholder="Cover letter"></textarea>

    <input type="password" id="pw" name="account_password">

    <button type="submit">Apply</button>
    <input type="submit" value="Send">
  </form>
  <form id="newsletter">
    <input type="submit" value="Subscribe">
  </form>
</body>
</html>
"#;

pub fn user(first: &str, last: &str, email: &str) -> UserRecord {
    UserRecord {
        first_name: Some(first.into()),
        last_name: Some(last.into()),
        email: Some(email.into()),
        ..UserRecord::default()
    }
}

/// Profile that covers every required field of `APPLICATION_PAGE`.
pub fn complete_profile() -> UserData {
    UserData {
        user: Some(user("Jane", "Doe", "jane@example.com")),
        personal_info: Some(PersonalInfo {
            phone: Some("+1 555 0100".into()),
            country: Some("US".into()),
            ..PersonalInfo::default()
        }),
        cv_data: Some(CvData {
            summary: Some("Backend engineer, 8 years of Rust and Go.".into()),
            ..CvData::default()
        }),
        cover_letter: Some(CoverLetter {
            content: Some("Dear hiring team, I would love to join.".into()),
        }),
        job: Some(JobInfo {
            title: Some("Backend Engineer".into()),
            company: Some("Acme".into()),
            ..JobInfo::default()
        }),
        answers: BTreeMap::new(),
    }
}

pub fn with_answer(mut data: UserData, key: &str, value: Value) -> UserData {
    data.answers.insert(key.to_string(), value);
    data
}
