// ============================================================================
// REGISTER VIEW - Alta de usuario
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::Page;
use crate::config::CONFIG;
use crate::dom::{field_value, on_submit, set_field_value, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::auth_viewmodel::{RegisterForm, REGISTER_FAILED};
use crate::viewmodels::AuthViewModel;
use crate::views::shared::{input, inline_error, labeled, set_busy, show_inline_error, submit_button, toast_success};

const SUBMIT_LABEL: &str = "Зарегистрироваться";
const SUBMIT_BUSY: &str = "Регистрация...";

pub fn render_register(root: &Element, state: &AppState) -> Result<(), JsValue> {
    log::info!("🎬 [REGISTER] render_register() llamado");
    let vm = AuthViewModel::new(state.api.clone());

    let first_name = input("text", "firstName", "Имя")?;
    let last_name = input("text", "lastName", "Фамилия")?;
    let email = input("email", "email", "you@example.com")?;
    let password = input("password", "password", "Минимум 6 символов")?;
    if let Some(last) = vm.last_register_email() {
        set_field_value(&email, &last);
    }
    let error = inline_error()?;
    let submit = submit_button(SUBMIT_LABEL)?;

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .child(labeled("Имя", &first_name)?)?
        .child(labeled("Фамилия", &last_name)?)?
        .child(labeled("Email", &email)?)?
        .child(labeled("Пароль", &password)?)?
        .child(error.clone())?
        .child(submit.clone())?
        .build();

    let login_link = ElementBuilder::new("a")?
        .class("auth-switch")
        .attr("href", Page::Login.file())?
        .text("Уже есть аккаунт? Войти")
        .build();

    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.text("Регистрация").build())?
        .child(form.clone())?
        .child(login_link)?
        .build();
    root.append_child(&card)?;

    let navigator = state.api.navigator();
    on_submit(&form, move || {
        let values = RegisterForm {
            first_name: field_value(&first_name),
            last_name: field_value(&last_name),
            email: field_value(&email),
            password: field_value(&password),
        };
        show_inline_error(&error, None);
        set_busy(&submit, true, SUBMIT_BUSY);
        let (vm, navigator) = (vm.clone(), navigator.clone());
        let (error, submit) = (error.clone(), submit.clone());
        spawn_local(async move {
            match vm.register(&values).await {
                Ok(()) => {
                    log::info!("✅ [REGISTER] Usuario registrado: {}", values.email);
                    toast_success("Регистрация прошла успешно");
                    navigator.go_to(&CONFIG.pages.login_page);
                }
                Err(e) => {
                    log::error!("❌ [REGISTER] Error: {}", e);
                    show_inline_error(&error, Some(&e.user_message(REGISTER_FAILED)));
                    set_busy(&submit, false, SUBMIT_LABEL);
                }
            }
        });
    })?;

    Ok(())
}
