// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: a login component and its markup

/// Sample component sources and markup for testing
pub struct ComponentFixtures;

impl ComponentFixtures {
    // ===== Markup =====

    /// Markup imported as `./login.html`
    pub const fn login_markup() -> &'static str {
        r##"<form id="login" data-test="login-form">
  <input id="user" data-testid="user-input">
  <input id="pass" type="password" data-testid="pass-input">
  <div id="sub-button" data-test="x">
    <button id="submit" data-test="submit">Sign in</button>
  </div>
  <button data-testid="ok">OK</button>
  <span id="user" data-test="x"></span>
</form>
"##
    }

    // ===== Component sources =====

    /// Exported class with one field; `submit` is assigned but undeclared on line 6
    pub const fn login_component() -> &'static str {
        r##"import template from "./login.html";

export class LoginForm {
    private form : HTMLFormElement;

    connect() {
        this.submit = document.querySelector("#submit");
    }
}
"##
    }

    /// Class without fields; `password` is assigned but undeclared on line 3
    pub const fn empty_class_component() -> &'static str {
        r##"import template from './login.html';
class LoginForm {
    connect() {
        this.password = document.querySelector('#pass');
        this.ok = document.querySelector(`[data-testid="ok"]`);
        this.missing = document.querySelector("#nope");
    }
}
"##
    }

    /// Decorated, non-exported class without fields; `password` is assigned on line 6
    pub const fn decorated_component() -> &'static str {
        r##"import template from './login.html';
@Component({
    selector: 'login-form',
})
class LoginForm {
    connect() {
        this.password = document.querySelector('#pass');
    }
}
"##
    }

    /// Component with no markup import
    pub const fn unlinked_component() -> &'static str {
        r##"export class Plain {
    connect() {
        this.el = document.querySelector("#x");
    }
}
"##
    }

    // ===== Completion sources (cursor marked with `|`) =====

    /// Cursor after `#` in an unterminated double-quoted literal
    pub const fn completion_after_hash() -> &'static str {
        r##"import template from "./login.html";
export class LoginForm {
    connect() {
        this.el = document.querySelector("#sub|
    }
}
"##
    }

    /// Cursor after `[` in a single-quoted literal with its closing quote
    pub const fn completion_after_bracket() -> &'static str {
        r##"import template from "./login.html";
export class LoginForm {
    connect() {
        this.el = document.querySelector('[|');
    }
}
"##
    }

    /// Cursor in an empty template literal
    pub const fn completion_in_template_literal() -> &'static str {
        r##"import template from "./login.html";
export class LoginForm {
    connect() {
        this.el = document.querySelector(`|`);
    }
}
"##
    }

    /// Cursor in a string that is not a selector literal
    pub const fn completion_outside_selector() -> &'static str {
        r##"import template from "./login.html";
const title = "#|";
"##
    }
}
