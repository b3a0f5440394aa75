// ============================================================================
// PROFILE VIEW - Datos del usuario, saldo, contraseña y salida
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::Page;
use crate::config::CONFIG;
use crate::dom::{field_value, on_click, on_submit, set_field_value, set_text_content, set_visible, ElementBuilder};
use crate::models::UserProfile;
use crate::state::AppState;
use crate::utils::i18n::{format_price, initials, or_dash};
use crate::viewmodels::profile_viewmodel::*;
use crate::viewmodels::ProfileViewModel;
use crate::views::shared::*;

/// Nodos que se repintan cuando cambia el perfil
#[derive(Clone)]
struct Card {
    avatar: Element,
    name: Element,
    email: Element,
    balance: Element,
    moderator: Element,
    first_name: Element,
    last_name: Element,
}

impl Card {
    fn paint(&self, profile: Option<&UserProfile>, is_moderator: bool) {
        let (first, last, email, balance) = match profile {
            Some(p) => (p.first_name.as_str(), p.last_name.as_str(), p.email.as_str(), p.balance),
            None => ("", "", "", 0.0),
        };
        set_text_content(&self.avatar, &initials(first, last));
        set_text_content(&self.name, &format!("{} {}", or_dash(first), or_dash(last)));
        set_text_content(&self.email, or_dash(email));
        set_text_content(&self.balance, &format_price(balance));
        set_field_value(&self.first_name, first);
        set_field_value(&self.last_name, last);
        if let Err(e) = set_visible(&self.moderator, is_moderator, "inline-block") {
            log::warn!("⚠️ [PROFILE] Error mostrando botón moderador: {:?}", e);
        }
    }
}

pub fn render_profile(root: &Element, state: &AppState) -> Result<(), JsValue> {
    log::info!("👤 [PROFILE] render_profile() llamado");
    let vm = ProfileViewModel::new(state.api.clone());

    let moderator = nav_button(state, "🛠️ Панель модератора", Page::Moderator)?;
    let header = render_header(
        "Профиль",
        vec![
            nav_button(state, "🏠 Каталог", Page::Home)?,
            nav_button(state, "📦 Заказы", Page::Orders)?,
            cart_button(state)?,
            moderator.clone(),
        ],
    )?;

    let card = Card {
        avatar: ElementBuilder::new("div")?.class("avatar").build(),
        name: ElementBuilder::new("h2")?.class("profile-name").build(),
        email: ElementBuilder::new("p")?.class("profile-email").build(),
        balance: ElementBuilder::new("span")?.class("profile-balance").build(),
        moderator,
        first_name: input("text", "firstName", "Имя")?,
        last_name: input("text", "lastName", "Фамилия")?,
    };
    card.paint(None, false);

    let logout = button("btn btn-danger", "Выйти")?;
    let summary = ElementBuilder::new("section")?
        .class("profile-card")
        .child(card.avatar.clone())?
        .child(card.name.clone())?
        .child(card.email.clone())?
        .child(ElementBuilder::new("p")?.text("Баланс: ").child(card.balance.clone())?.build())?
        .child(logout.clone())?
        .build();

    let main = ElementBuilder::new("main")?
        .class("profile-page")
        .child(summary)?
        .child(names_form(&vm, &card)?)?
        .child(recharge_form(&vm, &card)?)?
        .child(password_form(&vm)?)?
        .build();
    root.append_child(&header)?;
    root.append_child(&main)?;

    {
        let vm = vm.clone();
        let navigator = state.api.navigator();
        on_click(&logout, move |_| {
            vm.logout();
            navigator.go_to(&CONFIG.pages.login_page);
        })?;
    }

    spawn_local(async move {
        let painter = card.clone();
        let moderator = vm.is_moderator();
        let outcome = vm.load(|profile| painter.paint(profile.as_ref(), moderator)).await;
        card.paint(vm.profile().as_ref(), vm.is_moderator());
        if let Some(e) = outcome.error() {
            log::error!("❌ [PROFILE] Error cargando perfil: {}", e);
            toast_error(&e.user_message(PROFILE_LOAD_FAILED));
        }
    });
    Ok(())
}

fn section(title: &str, form: &Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("section")?
        .class("profile-section")
        .child(ElementBuilder::new("h3")?.text(title).build())?
        .child(form.clone())?
        .build())
}

fn names_form(vm: &ProfileViewModel, card: &Card) -> Result<Element, JsValue> {
    let error = inline_error()?;
    let submit = submit_button("Сохранить")?;
    let form = ElementBuilder::new("form")?
        .class("profile-form")
        .child(labeled("Имя", &card.first_name)?)?
        .child(labeled("Фамилия", &card.last_name)?)?
        .child(error.clone())?
        .child(submit.clone())?
        .build();

    let (vm, card) = (vm.clone(), card.clone());
    on_submit(&form, move || {
        show_inline_error(&error, None);
        let (first, last) = (field_value(&card.first_name), field_value(&card.last_name));
        if let Err(e) = validate_names(&first, &last) {
            show_inline_error(&error, Some(&e.user_message(PROFILE_UPDATE_FAILED)));
            return;
        }
        set_busy(&submit, true, "Сохранение...");
        let (vm, card, submit) = (vm.clone(), card.clone(), submit.clone());
        spawn_local(async move {
            match vm.update_names(&first, &last).await {
                Ok(profile) => {
                    card.paint(Some(&profile), vm.is_moderator());
                    toast_success(PROFILE_UPDATED);
                }
                Err(e) => {
                    log::error!("❌ [PROFILE] Error actualizando perfil: {}", e);
                    toast_error(&e.user_message(PROFILE_UPDATE_FAILED));
                }
            }
            set_busy(&submit, false, "Сохранить");
        });
    })?;
    section("Личные данные", &form)
}

fn recharge_form(vm: &ProfileViewModel, card: &Card) -> Result<Element, JsValue> {
    let amount = input("number", "amount", "Сумма")?;
    let error = inline_error()?;
    let submit = submit_button("Пополнить")?;
    let form = ElementBuilder::new("form")?
        .class("profile-form")
        .child(labeled("Сумма пополнения", &amount)?)?
        .child(error.clone())?
        .child(submit.clone())?
        .build();

    let (vm, card) = (vm.clone(), card.clone());
    on_submit(&form, move || {
        show_inline_error(&error, None);
        let raw = field_value(&amount);
        if let Err(e) = parse_amount(&raw) {
            show_inline_error(&error, Some(&e.user_message(INVALID_AMOUNT)));
            return;
        }
        set_busy(&submit, true, "Пополнение...");
        let (vm, card, submit, amount) = (vm.clone(), card.clone(), submit.clone(), amount.clone());
        spawn_local(async move {
            match vm.recharge(&raw).await {
                Ok(profile) => {
                    card.paint(Some(&profile), vm.is_moderator());
                    set_field_value(&amount, "");
                    toast_success(RECHARGED);
                }
                Err(e) => {
                    log::error!("❌ [PROFILE] Error recargando saldo: {}", e);
                    toast_error(&e.user_message(RECHARGE_FAILED));
                }
            }
            set_busy(&submit, false, "Пополнить");
        });
    })?;
    section("Пополнить баланс", &form)
}

fn password_form(vm: &ProfileViewModel) -> Result<Element, JsValue> {
    let current = input("password", "currentPassword", "Текущий пароль")?;
    let new = input("password", "newPassword", "Новый пароль")?;
    let confirm = input("password", "confirmPassword", "Повторите пароль")?;
    let error = inline_error()?;
    let submit = submit_button("Сменить пароль")?;
    let form = ElementBuilder::new("form")?
        .class("profile-form")
        .child(labeled("Текущий пароль", &current)?)?
        .child(labeled("Новый пароль", &new)?)?
        .child(labeled("Подтверждение", &confirm)?)?
        .child(error.clone())?
        .child(submit.clone())?
        .build();

    let vm = vm.clone();
    on_submit(&form, move || {
        show_inline_error(&error, None);
        let values = (field_value(&current), field_value(&new), field_value(&confirm));
        if let Err(e) = validate_password_change(&values.0, &values.1, &values.2) {
            show_inline_error(&error, Some(&e.user_message(PASSWORD_CHANGE_FAILED)));
            return;
        }
        set_busy(&submit, true, "Сохранение...");
        let (vm, submit) = (vm.clone(), submit.clone());
        let fields = [current.clone(), new.clone(), confirm.clone()];
        spawn_local(async move {
            match vm.change_password(&values.0, &values.1, &values.2).await {
                Ok(()) => {
                    for field in &fields {
                        set_field_value(field, "");
                    }
                    toast_success(PASSWORD_CHANGED);
                }
                Err(e) => {
                    log::error!("❌ [PROFILE] Error cambiando contraseña: {}", e);
                    toast_error(&e.user_message(PASSWORD_CHANGE_FAILED));
                }
            }
            set_busy(&submit, false, "Сменить пароль");
        });
    })?;
    section("Смена пароля", &form)
}
