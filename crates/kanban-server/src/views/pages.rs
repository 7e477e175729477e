use super::layout::{page, APP_NAME};

pub fn home() -> String {
    let body = format!(
        r#"<section class="hero">
<h1>{APP_NAME}</h1>
<p>Organize your work in boards, lists and cards.</p>
<a class="button" href="/dashboard">Open dashboard</a>
</section>"#
    );
    page("Home", &body, false)
}

// Account forms are presentational only; nothing handles their submission.

pub fn register() -> String {
    let body = r#"<section class="auth">
<h1>Create account</h1>
<form class="auth-form" onsubmit="return false">
<label>Name <input type="text" name="name"></label>
<label>Email <input type="email" name="email"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>
</section>"#;
    page("Register", body, false)
}

pub fn login() -> String {
    let body = r#"<section class="auth">
<h1>Log in</h1>
<form class="auth-form" onsubmit="return false">
<label>Email <input type="email" name="email"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Log in</button>
</form>
<p>New here? <a href="/register">Create an account</a></p>
</section>"#;
    page("Login", body, false)
}
