// ============================================================================
// HOME VIEW - Catálogo: top 10, búsqueda, categorías y filtros
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::{product_url, Page};
use crate::config::CONFIG;
use crate::dom::{clear_children, field_value, on_click, on_input, on_submit, set_field_value, set_text_content, toggle_class, ElementBuilder};
use crate::error::ClientResult;
use crate::models::{Category, Product, ProductFilters};
use crate::state::AppState;
use crate::utils::i18n::{format_price, format_rating, stock_line};
use crate::viewmodels::catalog_viewmodel::*;
use crate::viewmodels::wishlist_viewmodel::{WISHLIST_ADDED, WISHLIST_REMOVED, WISHLIST_TOGGLE_FAILED};
use crate::viewmodels::{CartViewModel, CatalogViewModel};
use crate::views::shared::*;

/// Contexto que comparten los handlers de la página
#[derive(Clone)]
struct Home {
    state: AppState,
    vm: CatalogViewModel,
    grid: Element,
    status: Element,
}

pub fn render_home(root: &Element, state: &AppState) -> Result<(), JsValue> {
    log::info!("🏠 [HOME] render_home() llamado");
    let vm = CatalogViewModel::new(state.api.clone());

    let favorites = button("nav-btn", "♡ Избранное")?;
    on_click(&favorites, |_| toast_info(FAVORITES_PAGE_PENDING))?;
    let orders = button("nav-btn", "📦 Заказы")?;
    on_click(&orders, |_| toast_info(ORDERS_PAGE_PENDING))?;
    let header = render_header(
        "Каталог",
        vec![nav_button(state, "👤 Профиль", Page::Profile)?, cart_button(state)?, favorites, orders],
    )?;

    let top = ElementBuilder::new("div")?.class("top-products").build();
    let status = ElementBuilder::new("p")?.class("grid-status").build();
    let grid = ElementBuilder::new("div")?.class("product-grid").build();
    let home = Home { state: state.clone(), vm, grid: grid.clone(), status: status.clone() };

    let main = ElementBuilder::new("main")?
        .class("home")
        .child(render_search(&home)?)?
        .child(render_categories(&home)?)?
        .child(render_filters(&home)?)?
        .child(ElementBuilder::new("h2")?.text("Популярные товары").build())?
        .child(top.clone())?
        .child(ElementBuilder::new("h2")?.text("Товары").build())?
        .child(status)?
        .child(grid)?
        .build();
    root.append_child(&header)?;
    root.append_child(&main)?;

    fill_skeletons(&top, CONFIG.ui_config.top_skeletons, "product-card skeleton")?;
    refresh_cart_badge(state);

    spawn_local(async move {
        // Primero la wishlist: los corazones salen con el estado correcto
        if let Some(e) = home.vm.init().await.error() {
            log::warn!("⚠️ [HOME] Wishlist no disponible: {}", e);
        }
        match home.vm.top_products().await {
            Ok(products) if products.is_empty() => log_dom(show_empty(&top, TOP_EMPTY)),
            Ok(products) => {
                log::info!("✅ [HOME] Top: {} productos", products.len());
                log_dom(home.paint_cards(&top, &products));
            }
            Err(e) => {
                log::error!("❌ [HOME] Error cargando top: {}", e);
                toast_error(&e.user_message(TOP_FAILED));
                log_dom(show_empty(&top, TOP_EMPTY));
            }
        }
    });

    Ok(())
}

/// Badge del header desde la caché y luego desde el servidor
pub fn refresh_cart_badge(state: &AppState) {
    let cart = CartViewModel::new(state.api.clone());
    let state = state.clone();
    spawn_local(async move {
        cart.load(|snapshot| state.show_cart(snapshot)).await;
    });
}

fn render_search(home: &Home) -> Result<Element, JsValue> {
    let field = input("search", "search", "Поиск товаров...")?;
    field.set_class_name("search-input");
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    let home = home.clone();
    let target = field.clone();
    on_input(&field, move |_| {
        let query = field_value(&target);
        let home = home.clone();
        // Reemplazar el Timeout anterior lo cancela
        let timeout = Timeout::new(CONFIG.ui_config.search_debounce_ms, move || {
            if normalize_query(&query).is_none() {
                return;
            }
            home.run(move |vm| async move { vm.search(&query).await.map(Option::unwrap_or_default) }, SEARCH_FAILED);
        });
        *pending.borrow_mut() = Some(timeout);
    })?;

    Ok(ElementBuilder::new("div")?.class("search-bar").child(field)?.build())
}

fn render_categories(home: &Home) -> Result<Element, JsValue> {
    let pills = ElementBuilder::new("div")?.class("category-pills").build();
    let mut entries = vec![("", "Все")];
    entries.extend(Category::ALL.iter().map(|c| (c.code(), c.label())));

    for (code, label) in entries {
        let pill = button("category-pill", label)?;
        let (home, all_pills, this) = (home.clone(), pills.clone(), pill.clone());
        on_click(&pill, move |_| {
            mark_active(&all_pills, &this);
            home.run(move |vm| async move { vm.by_category(code).await }, CATEGORY_FAILED);
        })?;
        pills.append_child(&pill)?;
    }
    Ok(pills)
}

fn mark_active(pills: &Element, active: &Element) {
    let children = pills.children();
    for i in 0..children.length() {
        if let Some(pill) = children.item(i) {
            let _ = toggle_class(&pill, "active", &pill == active);
        }
    }
}

fn render_filters(home: &Home) -> Result<Element, JsValue> {
    let rating = input("number", "ratingAbove", "Рейтинг от")?;
    let min_price = input("number", "minPrice", "Цена от")?;
    let max_price = input("number", "maxPrice", "Цена до")?;
    let category = ElementBuilder::new("select")?.class("form-input").attr("name", "category")?.build();
    category.append_child(&ElementBuilder::new("option")?.attr("value", "")?.text("Все категории").build())?;
    for c in Category::ALL {
        category.append_child(&ElementBuilder::new("option")?.attr("value", c.code())?.text(c.label()).build())?;
    }
    let reset = button("btn btn-secondary", "Сбросить")?;

    let form = ElementBuilder::new("form")?
        .class("filters")
        .child(labeled("Рейтинг выше", &rating)?)?
        .child(labeled("Мин. цена", &min_price)?)?
        .child(labeled("Макс. цена", &max_price)?)?
        .child(labeled("Категория", &category)?)?
        .child(submit_button("Применить")?)?
        .child(reset.clone())?
        .build();

    {
        let home = home.clone();
        let (rating, min_price, max_price, category) = (rating.clone(), min_price.clone(), max_price.clone(), category.clone());
        on_submit(&form, move || {
            let filters = ProductFilters {
                rating_above: field_value(&rating),
                min_price: field_value(&min_price),
                max_price: field_value(&max_price),
                category: field_value(&category),
            };
            home.run(move |vm| async move { vm.apply_filters(&filters).await }, FILTERS_FAILED);
        })?;
    }

    let home = home.clone();
    on_click(&reset, move |_| {
        for field in [&rating, &min_price, &max_price, &category] {
            set_field_value(field, "");
        }
        clear_children(&home.grid);
        set_text_content(&home.status, "");
    })?;

    Ok(form)
}

impl Home {
    /// Skeletons, petición, y luego tarjetas o estado vacío
    fn run<F, Fut>(&self, fetch: F, failure: &'static str)
    where
        F: FnOnce(CatalogViewModel) -> Fut + 'static,
        Fut: std::future::Future<Output = ClientResult<Vec<Product>>> + 'static,
    {
        let home = self.clone();
        set_text_content(&home.status, GRID_LOADING);
        log_dom(fill_skeletons(&home.grid, CONFIG.ui_config.grid_skeletons, "product-card skeleton"));
        spawn_local(async move {
            match fetch(home.vm.clone()).await {
                Ok(products) => {
                    set_text_content(&home.status, &grid_status(products.len()));
                    if products.is_empty() {
                        clear_children(&home.grid);
                    } else {
                        log_dom(home.paint_cards(&home.grid, &products));
                    }
                }
                Err(e) => {
                    log::error!("❌ [HOME] {}: {}", failure, e);
                    toast_error(&e.user_message(failure));
                    set_text_content(&home.status, GRID_EMPTY);
                    clear_children(&home.grid);
                }
            }
        });
    }

    fn paint_cards(&self, container: &Element, products: &[Product]) -> Result<(), JsValue> {
        clear_children(container);
        for product in products {
            let card = self.product_card(product)?;
            container.append_child(&card)?;
        }
        Ok(())
    }

    fn product_card(&self, product: &Product) -> Result<Element, JsValue> {
        let vm = self.vm.clone();
        let id = product.id;
        let image = lazy_image(&product.name, async move { vm.product_image(id).await })?;

        let heart = button("wishlist-toggle", heart_icon(self.vm.wishlist().contains(id)))?;
        {
            let (wishlist, heart_el) = (self.vm.wishlist().clone(), heart.clone());
            on_click(&heart, move |event| {
                event.stop_propagation();
                let (wishlist, heart_el) = (wishlist.clone(), heart_el.clone());
                spawn_local(async move {
                    match wishlist.toggle(id).await {
                        Ok(added) => {
                            set_text_content(&heart_el, heart_icon(added));
                            toast_success(if added { WISHLIST_ADDED } else { WISHLIST_REMOVED });
                        }
                        Err(e) => {
                            log::error!("❌ [HOME] Error en wishlist {}: {}", id, e);
                            toast_error(&e.user_message(WISHLIST_TOGGLE_FAILED));
                        }
                    }
                });
            })?;
        }

        let card = ElementBuilder::new("div")?
            .class("product-card")
            .child(image)?
            .child(heart)?
            .child(ElementBuilder::new("h3")?.class("product-name").text(&product.name).build())?
            .child(ElementBuilder::new("p")?.class("product-category").text(&product.category_label()).build())?
            .child(ElementBuilder::new("p")?.class("product-price").text(&format_price(product.price)).build())?
            .child(ElementBuilder::new("p")?.class("product-rating").text(&format!("⭐ {}", format_rating(product.rating))).build())?
            .child(ElementBuilder::new("p")?.class("product-stock").text(&stock_line(product.stock)).build())?
            .build();

        let navigator = self.state.api.navigator();
        on_click(&card, move |_| navigator.go_to(&product_url(id)))?;
        Ok(card)
    }
}

fn heart_icon(active: bool) -> &'static str {
    if active {
        "♥"
    } else {
        "♡"
    }
}

fn log_dom(result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("❌ [HOME] Error de DOM: {:?}", e);
    }
}
