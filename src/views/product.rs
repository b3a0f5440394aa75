// ============================================================================
// PRODUCT VIEW - Detalle, carrito, wishlist, favoritos y reseñas
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::Page;
use crate::config::CONFIG;
use crate::dom::{clear_children, field_value, location_search, on_click, on_submit, set_disabled, set_field_value, set_text_content, toggle_class, ElementBuilder};
use crate::models::{Product, ReviewsPage};
use crate::state::AppState;
use crate::utils::i18n::{format_price, format_rating, stock_badge};
use crate::viewmodels::cart_viewmodel::{CartUpdate, CART_ITEM_ADDED};
use crate::viewmodels::product_viewmodel::*;
use crate::viewmodels::wishlist_viewmodel::WISHLIST_ADDED;
use crate::viewmodels::ProductViewModel;
use crate::views::home::refresh_cart_badge;
use crate::views::shared::*;

pub fn render_product(root: &Element, state: &AppState) -> Result<(), JsValue> {
    log::info!("📄 [PRODUCT] render_product() llamado");
    let header = render_header(
        "Товар",
        vec![nav_button(state, "👤 Профиль", Page::Profile)?, cart_button(state)?],
    )?;
    let main = ElementBuilder::new("main")?.class("product-page").build();
    root.append_child(&header)?;
    root.append_child(&main)?;
    refresh_cart_badge(state);

    let Some(product_id) = parse_product_id(&location_search()) else {
        log::warn!("⚠️ [PRODUCT] Sin ?id= en la URL");
        toast_error(MISSING_PRODUCT_ID);
        go_home_after(state, MISSING_ID_REDIRECT_MS);
        return Ok(());
    };

    show_empty(&main, "Загрузка...")?;
    let vm = ProductViewModel::new(state.api.clone(), state.favorites.clone());
    let state = state.clone();
    spawn_local(async move {
        if let Some(e) = vm.init().await.error() {
            log::warn!("⚠️ [PRODUCT] Wishlist no disponible: {}", e);
        }
        match vm.load(product_id).await {
            Ok((product, reviews)) => {
                if let Err(e) = paint_page(&main, &state, &vm, product, reviews) {
                    log::error!("❌ [PRODUCT] Error de DOM: {:?}", e);
                }
            }
            Err(e) => {
                log::error!("❌ [PRODUCT] Error cargando {}: {}", product_id, e);
                toast_error(&e.user_message(PAGE_LOAD_FAILED));
                go_home_after(&state, CONFIG.ui_config.product_error_redirect_ms);
            }
        }
    });
    Ok(())
}

fn go_home_after(state: &AppState, millis: u32) {
    let navigator = state.api.navigator();
    Timeout::new(millis, move || navigator.go_to(&CONFIG.pages.home_page)).forget();
}

fn paint_page(main: &Element, state: &AppState, vm: &ProductViewModel, product: Product, reviews: ReviewsPage) -> Result<(), JsValue> {
    clear_children(main);
    let id = product.id;
    let image = {
        let vm = vm.clone();
        lazy_image(&product.name, async move { vm.image(id).await })?
    };
    let (stock_class, stock_text) = stock_badge(product.stock);

    let add_to_cart = button("btn btn-primary", "В корзину")?;
    set_disabled(&add_to_cart, !product.in_stock())?;
    let add_to_wishlist = button("btn btn-secondary", "В избранное")?;
    let favorite = button("favorite-toggle", favorite_icon(vm.is_favorite(id)))?;

    let info = ElementBuilder::new("section")?
        .class("product-info")
        .child(ElementBuilder::new("h2")?.class("product-name").text(&product.name).build())?
        .child(ElementBuilder::new("p")?.class("product-category").text(&product.category_label()).build())?
        .child(ElementBuilder::new("p")?.class("product-price").text(&format_price(product.price)).build())?
        .child(ElementBuilder::new("p")?.class("product-rating").text(&format!("⭐ {}", format_rating(product.rating))).build())?
        .child(ElementBuilder::new("span")?.class(&format!("stock-badge {}", stock_class)).text(&stock_text).build())?
        .child(ElementBuilder::new("p")?.class("product-description").text(description_or_default(&product)).build())?
        .child(ElementBuilder::new("div")?.class("product-actions").child(add_to_cart.clone())?.child(add_to_wishlist.clone())?.child(favorite.clone())?.build())?
        .build();

    let overview = ElementBuilder::new("div")?.class("reviews-overview").build();
    let list = ElementBuilder::new("div")?.class("reviews-list").build();
    paint_reviews(&overview, &list, &reviews)?;

    let reviews_section = ElementBuilder::new("section")?
        .class("reviews")
        .child(ElementBuilder::new("h3")?.text("Отзывы").build())?
        .child(overview.clone())?
        .child(list.clone())?
        .child(review_form(vm, id, overview, list)?)?
        .build();

    main.append_child(&ElementBuilder::new("div")?.class("product-layout").child(image)?.child(info)?.build())?;
    main.append_child(&reviews_section)?;

    {
        let (vm, state, btn) = (vm.clone(), state.clone(), add_to_cart.clone());
        on_click(&add_to_cart, move |_| {
            set_busy(&btn, true, "Добавляем...");
            let (vm, state, btn, product) = (vm.clone(), state.clone(), btn.clone(), product.clone());
            spawn_local(async move {
                match vm.add_to_cart(&product).await {
                    Ok(CartUpdate::Synced(snapshot)) => {
                        state.show_cart(&snapshot);
                        toast_success(CART_ITEM_ADDED);
                    }
                    Ok(CartUpdate::ReloadFailed(e)) => {
                        toast_success(CART_ITEM_ADDED);
                        toast_error(&e.user_message(&vm.cart().reload_failed_message()));
                    }
                    Err(e) => {
                        log::error!("❌ [PRODUCT] Error añadiendo al carrito: {}", e);
                        toast_error(&e.user_message(CART_ADD_FAILED));
                    }
                }
                set_busy(&btn, false, "В корзину");
            });
        })?;
    }
    {
        let (vm, btn, fav) = (vm.clone(), add_to_wishlist.clone(), favorite.clone());
        on_click(&add_to_wishlist, move |_| {
            set_busy(&btn, true, "Добавляем...");
            let (vm, btn, fav) = (vm.clone(), btn.clone(), fav.clone());
            spawn_local(async move {
                match vm.add_to_wishlist(id).await {
                    Ok(()) => {
                        set_text_content(&fav, favorite_icon(true));
                        toast_success(WISHLIST_ADDED);
                    }
                    Err(e) => {
                        log::error!("❌ [PRODUCT] Error en wishlist: {}", e);
                        toast_error(&e.user_message(WISHLIST_ADD_FAILED));
                    }
                }
                set_busy(&btn, false, "В избранное");
            });
        })?;
    }
    {
        let (vm, fav) = (vm.clone(), favorite.clone());
        on_click(&favorite, move |_| {
            let now = vm.toggle_favorite(id);
            set_text_content(&fav, favorite_icon(now));
        })?;
    }
    Ok(())
}

fn favorite_icon(active: bool) -> &'static str {
    if active {
        "❤️"
    } else {
        "🤍"
    }
}

fn paint_reviews(overview: &Element, list: &Element, page: &ReviewsPage) -> Result<(), JsValue> {
    set_text_content(
        overview,
        &format!("⭐ {} · {}", format_rating(page.overall_rating), reviews_count_label(page.number_of_reviews)),
    );
    if page.reviews.is_empty() {
        return show_empty(list, NO_REVIEWS);
    }
    clear_children(list);
    for review in &page.reviews {
        let item = ElementBuilder::new("div")?
            .class("review")
            .child(ElementBuilder::new("strong")?.text(&review_author(review.user_id)).build())?
            .child(ElementBuilder::new("span")?.class("review-stars").text(&review.stars()).build())?
            .child(ElementBuilder::new("p")?.text(&review.comment).build())?
            .build();
        list.append_child(&item)?;
    }
    Ok(())
}

/// Cinco estrellas + comentario; al publicar se recargan las reseñas
fn review_form(vm: &ProductViewModel, product_id: i64, overview: Element, list: Element) -> Result<Element, JsValue> {
    let rating = Rc::new(Cell::new(0_i64));
    let stars = ElementBuilder::new("div")?.class("star-picker").build();
    for value in 1..=5_i64 {
        let star = button("star", "☆")?;
        let (rating, picker) = (rating.clone(), stars.clone());
        on_click(&star, move |_| {
            rating.set(value);
            paint_stars(&picker, value);
        })?;
        stars.append_child(&star)?;
    }

    let comment = ElementBuilder::new("textarea")?
        .class("form-input")
        .attr("name", "comment")?
        .attr("placeholder", "Ваш отзыв")?
        .build();
    let error = inline_error()?;
    let submit = submit_button("Отправить отзыв")?;
    let form = ElementBuilder::new("form")?
        .class("review-form")
        .child(stars.clone())?
        .child(comment.clone())?
        .child(error.clone())?
        .child(submit.clone())?
        .build();

    let vm = vm.clone();
    on_submit(&form, move || {
        show_inline_error(&error, None);
        if let Err(e) = validate_review(rating.get(), &field_value(&comment)) {
            show_inline_error(&error, Some(&e.user_message(REVIEW_FAILED)));
            return;
        }
        set_busy(&submit, true, "Отправка...");
        let (vm, rating, stars) = (vm.clone(), rating.clone(), stars.clone());
        let (comment, error, submit) = (comment.clone(), error.clone(), submit.clone());
        let (overview, list) = (overview.clone(), list.clone());
        spawn_local(async move {
            match vm.submit_review(product_id, rating.get(), &field_value(&comment)).await {
                Ok(page) => {
                    toast_success(REVIEW_ADDED);
                    set_field_value(&comment, "");
                    rating.set(0);
                    paint_stars(&stars, 0);
                    if let Err(e) = paint_reviews(&overview, &list, &page) {
                        log::error!("❌ [PRODUCT] Error pintando reseñas: {:?}", e);
                    }
                }
                Err(e) => {
                    log::error!("❌ [PRODUCT] Error enviando reseña: {}", e);
                    toast_error(&e.user_message(REVIEW_FAILED));
                }
            }
            set_busy(&submit, false, "Отправить отзыв");
        });
    })?;
    Ok(form)
}

fn paint_stars(picker: &Element, rating: i64) {
    let children = picker.children();
    for i in 0..children.length() {
        if let Some(star) = children.item(i) {
            let on = i64::from(i) < rating;
            set_text_content(&star, if on { "★" } else { "☆" });
            let _ = toggle_class(&star, "selected", on);
        }
    }
}
