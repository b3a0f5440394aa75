// ============================================================================
// LOGIN VIEW - Formulario de acceso
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::Page;
use crate::config::CONFIG;
use crate::dom::{field_value, on_submit, set_field_value, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::auth_viewmodel::login_error_message;
use crate::viewmodels::AuthViewModel;
use crate::views::shared::{input, inline_error, labeled, set_busy, show_inline_error, submit_button};

const SUBMIT_LABEL: &str = "Войти";
const SUBMIT_BUSY: &str = "Вход...";

/// Renderizar vista de login
pub fn render_login(root: &Element, state: &AppState) -> Result<(), JsValue> {
    log::info!("🎬 [LOGIN] render_login() llamado");
    let vm = AuthViewModel::new(state.api.clone());

    let email = input("email", "email", "you@example.com")?;
    let password = input("password", "password", "••••••")?;
    if let Some(last) = vm.last_login_email() {
        set_field_value(&email, &last);
    }
    let error = inline_error()?;
    let submit = submit_button(SUBMIT_LABEL)?;

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .child(labeled("Email", &email)?)?
        .child(labeled("Пароль", &password)?)?
        .child(error.clone())?
        .child(submit.clone())?
        .build();

    let register_link = ElementBuilder::new("a")?
        .class("auth-switch")
        .attr("href", Page::Register.file())?
        .text("Нет аккаунта? Зарегистрироваться")
        .build();

    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.text("Вход").build())?
        .child(form.clone())?
        .child(register_link)?
        .build();
    root.append_child(&card)?;

    let navigator = state.api.navigator();
    on_submit(&form, move || {
        show_inline_error(&error, None);
        set_busy(&submit, true, SUBMIT_BUSY);
        let (vm, navigator) = (vm.clone(), navigator.clone());
        let (error, submit) = (error.clone(), submit.clone());
        let (email, password) = (field_value(&email), field_value(&password));
        spawn_local(async move {
            match vm.login(&email, &password).await {
                Ok(profile) => {
                    log::info!("✅ [LOGIN] Sesión iniciada para {}", profile.email);
                    navigator.go_to(&CONFIG.pages.home_page);
                }
                Err(e) => {
                    log::error!("❌ [LOGIN] Error: {}", e);
                    show_inline_error(&error, Some(&login_error_message(&e)));
                    set_busy(&submit, false, SUBMIT_LABEL);
                }
            }
        });
    })?;

    Ok(())
}
