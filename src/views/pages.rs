//! Page bodies. Each returns the markup placed inside the layout.

use super::html::escape;
use crate::forms::UnsubscribeStep;
use crate::models::{Modal, OnboardingStage};
use crate::session::SessionStore;

pub fn home(session: &SessionStore) -> String {
    let modal = if session.state().is_authenticated() {
        String::new()
    } else {
        auth_modal(session.modal())
    };
    format!(
        "<section class=\"hero\"><h1>Get paid for your opinion</h1><p>Take surveys, earn points, spin for bonus rewards.</p><a href=\"/?modal=signUp\">Get started</a></section>\n{}",
        modal
    )
}

fn auth_modal(modal: Modal) -> String {
    let form = match modal {
        Modal::Login => "<h2>Log in</h2>\
<form data-endpoint=\"/api/auth/login\"><input type=\"email\" name=\"email\" required><input type=\"password\" name=\"password\" required><button type=\"submit\">Log in</button></form>\
<button class=\"google\" data-endpoint=\"/api/auth/google\">Continue with Google</button>\
<a href=\"/?modal=forgotPassword\">Forgot password?</a> <a href=\"/?modal=signUp\">Create an account</a>",
        Modal::SignUp => "<h2>Sign up</h2>\
<form data-endpoint=\"/api/auth/signup\"><input name=\"firstName\"><input name=\"lastName\"><input type=\"email\" name=\"email\" required><input type=\"password\" name=\"password\" required><button type=\"submit\">Sign up</button></form>\
<button class=\"google\" data-endpoint=\"/api/auth/google\">Continue with Google</button>\
<a href=\"/?modal=login\">Already have an account?</a>",
        Modal::ForgotPassword => "<h2>Reset your password</h2>\
<form data-endpoint=\"/api/auth/forgot-password\"><input type=\"email\" name=\"email\" required><button type=\"submit\">Send reset link</button></form>\
<a href=\"/?modal=login\">Back to log in</a>",
    };
    format!(
        "<dialog open class=\"auth-modal\" data-modal=\"{}\">{}</dialog>",
        modal.as_str(),
        form
    )
}

pub fn about() -> String {
    "<h1>About us</h1><p>Hubsite Social connects people who want to be heard with researchers who want to listen.</p>".to_string()
}

pub fn features() -> String {
    "<h1>Features</h1><ul><li>Paid surveys matched to your profile</li><li>Daily reward spinner</li><li>Fast payouts</li></ul>".to_string()
}

pub fn faq() -> String {
    "<h1>Frequently asked questions</h1>\
<details><summary>How do I earn points?</summary><p>Complete surveys from your dashboard.</p></details>\
<details><summary>Why was I screened out?</summary><p>Some surveys look for a specific audience. You will be matched with others.</p></details>".to_string()
}

pub fn works() -> String {
    "<h1>How it works</h1><ol><li>Sign up</li><li>Answer a few onboarding questions</li><li>Take surveys and collect rewards</li></ol>".to_string()
}

pub fn terms_of_use() -> String {
    "<h1>Terms of use</h1><p>By using Hubsite Social you agree to answer surveys honestly.</p>".to_string()
}

pub fn privacy_policy() -> String {
    "<h1>Privacy policy</h1><p>We share survey answers with researchers without identifying you.</p>".to_string()
}

pub fn reward_policy() -> String {
    "<h1>Reward policy</h1><p>Points are credited once a survey completion is confirmed.</p>".to_string()
}

pub fn dashboard(session: &SessionStore) -> String {
    let name = session
        .current_user()
        .map(|u| u.display_name())
        .unwrap_or_default();
    format!(
        "<h1>Welcome back, {}</h1><section class=\"rewards\"><h2>Your rewards</h2></section>",
        escape(&name)
    )
}

pub fn spinner() -> String {
    "<h1>Spinner</h1><section class=\"spinner\"><button type=\"button\">Spin</button></section>".to_string()
}

pub fn surveys() -> String {
    "<h1>Surveys</h1><section class=\"surveys\"><p>New surveys appear here as soon as you qualify.</p></section>".to_string()
}

pub fn onboarding(stage: OnboardingStage) -> String {
    match stage {
        OnboardingStage::GetStarted => "<h1>Let's get you set up</h1><p>A few questions help us match you with surveys.</p><a href=\"/onboarding?stage=questions\">Get started</a>".to_string(),
        OnboardingStage::Questions => "<h1>About you</h1><form data-endpoint=\"/api/onboarding/complete\"><button type=\"submit\">Finish</button></form>".to_string(),
    }
}

pub fn subscription(step: &UnsubscribeStep) -> String {
    let error = step
        .error()
        .map(|e| format!("<p class=\"error\" role=\"alert\">{}</p>", escape(e)))
        .unwrap_or_default();
    match step {
        UnsubscribeStep::Step1 { email, .. } => format!(
            "<h1>Unsubscribe</h1><form method=\"post\" action=\"/subscription\" data-step=\"1\"><input type=\"hidden\" name=\"step\" value=\"1\"><input type=\"email\" name=\"email\" value=\"{}\">{}<button name=\"action\" value=\"unsubscribe\">Unsubscribe</button></form>",
            escape(email),
            error
        ),
        UnsubscribeStep::Step2 { email, .. } => format!(
            "<h1>Are you sure?</h1><p>We will stop emailing {}.</p><form method=\"post\" action=\"/subscription\" data-step=\"2\"><input type=\"hidden\" name=\"step\" value=\"2\"><input type=\"hidden\" name=\"email\" value=\"{}\">{}<button name=\"action\" value=\"confirm\">Yes, unsubscribe</button><button name=\"action\" value=\"back\">No, not yet</button></form>",
            escape(email),
            escape(email),
            error
        ),
        UnsubscribeStep::Step3 => "<h1>You're unsubscribed</h1><p data-step=\"3\">You will no longer receive our newsletter.</p><a href=\"/\">Back to home</a>".to_string(),
    }
}

pub fn standalone_success() -> String {
    "<h1>Thank you!</h1><p>Your response has been recorded. Points will appear in your dashboard shortly.</p><a href=\"/dashboard\">Go to dashboard</a>".to_string()
}

pub fn screened_out() -> String {
    "<h1>This survey wasn't a match</h1><p>You didn't fit the audience for this one. Check your dashboard for other surveys.</p><a href=\"/dashboard\">Find another survey</a>".to_string()
}

pub fn quality_issue() -> String {
    "<h1>We couldn't accept this response</h1><p>The answers didn't pass the survey's quality checks.</p><a href=\"/dashboard\">Back to dashboard</a>".to_string()
}

pub fn target_reached() -> String {
    "<h1>This survey is full</h1><p>Enough responses were collected before you finished.</p><a href=\"/dashboard\">Find another survey</a>".to_string()
}

pub fn admin() -> String {
    "<h1>Admin</h1><div id=\"admin-root\"></div>".to_string()
}

pub fn not_found() -> String {
    "<h1>Page not found</h1><a href=\"/\">Back to home</a>".to_string()
}
