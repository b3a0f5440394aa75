// ============================================================================
// CART VIEW - Líneas del carrito, totales y checkout
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::{product_url, Page};
use crate::dom::{clear_children, confirm, on_click, set_disabled, set_text_content, set_visible, ElementBuilder};
use crate::error::ClientResult;
use crate::models::CartSnapshot;
use crate::services::SyncOutcome;
use crate::state::AppState;
use crate::viewmodels::cart_viewmodel::*;
use crate::viewmodels::CartViewModel;
use crate::views::shared::*;

const CART_EMPTY: &str = "Корзина пуста";

#[derive(Clone)]
struct CartPage {
    state: AppState,
    vm: CartViewModel,
    list: Element,
    summary: Element,
    total: Element,
    count: Element,
    checkout: Element,
    /// Sólo el último repintado lanzado puede escribir la lista
    generation: Rc<Cell<u32>>,
}

pub fn render_cart(root: &Element, state: &AppState) -> Result<(), JsValue> {
    log::info!("🛒 [CART] render_cart() llamado");
    let header = render_header(
        "Корзина",
        vec![nav_button(state, "🏠 Каталог", Page::Home)?, nav_button(state, "👤 Профиль", Page::Profile)?, cart_button(state)?],
    )?;

    let list = ElementBuilder::new("div")?.class("cart-items").build();
    let total = ElementBuilder::new("span")?.class("cart-total").build();
    let count = ElementBuilder::new("span")?.class("cart-count").build();
    let checkout = button("btn btn-primary", "Оформить заказ")?;
    let summary = ElementBuilder::new("div")?
        .class("cart-summary")
        .child(ElementBuilder::new("p")?.text("Итого: ").child(total.clone())?.build())?
        .child(ElementBuilder::new("p")?.text("Товаров: ").child(count.clone())?.build())?
        .build();
    let aside = ElementBuilder::new("aside")?.class("cart-aside").child(summary.clone())?.child(checkout.clone())?.build();
    let main = ElementBuilder::new("main")?.class("cart-page").child(list.clone())?.child(aside)?.build();
    root.append_child(&header)?;
    root.append_child(&main)?;

    let page = CartPage {
        state: state.clone(),
        vm: CartViewModel::new(state.api.clone()),
        list,
        summary,
        total,
        count,
        checkout,
        generation: Rc::new(Cell::new(0)),
    };
    fill_skeletons(&page.list, 3, "cart-item skeleton")?;
    set_disabled(&page.checkout, true)?;

    {
        let (page, checkout) = (page.clone(), page.checkout.clone());
        on_click(&checkout, move |_| {
            if let Some(message) = page.vm.checkout_message() {
                toast_info(message);
            }
        })?;
    }

    spawn_local(async move {
        let painter = page.clone();
        let outcome = page.vm.load(|snapshot| painter.show(snapshot.clone())).await;
        if let Some(e) = outcome.error() {
            toast_error(&e.user_message("Не удалось загрузить корзину"));
        }
        // Sin caché y sin servidor: estado vacío
        if matches!(outcome, SyncOutcome::Empty(_)) {
            page.show(CartSnapshot::default());
        }
    });
    Ok(())
}

impl CartPage {
    /// Resumen y badge al instante; las líneas tras enriquecer con productos
    fn show(&self, snapshot: CartSnapshot) {
        self.state.show_cart(&snapshot);
        if let Err(e) = self.paint_summary(&snapshot) {
            log::error!("❌ [CART] Error pintando resumen: {:?}", e);
        }
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let page = self.clone();
        spawn_local(async move {
            let lines = page.vm.lines(&snapshot).await;
            if page.generation.get() != generation {
                return;
            }
            if let Err(e) = page.paint_lines(&lines) {
                log::error!("❌ [CART] Error pintando líneas: {:?}", e);
            }
        });
    }

    fn paint_summary(&self, snapshot: &CartSnapshot) -> Result<(), JsValue> {
        let empty = snapshot.is_empty();
        set_text_content(&self.total, &total_label(snapshot));
        set_text_content(&self.count, &snapshot.total_items.to_string());
        set_visible(&self.summary, !empty, "block")?;
        set_disabled(&self.checkout, empty)?;
        if empty {
            show_empty(&self.list, CART_EMPTY)?;
        }
        Ok(())
    }

    fn paint_lines(&self, lines: &[CartLine]) -> Result<(), JsValue> {
        if lines.is_empty() {
            return show_empty(&self.list, CART_EMPTY);
        }
        clear_children(&self.list);
        for line in lines {
            let row = self.line_row(line)?;
            self.list.append_child(&row)?;
        }
        Ok(())
    }

    fn line_row(&self, line: &CartLine) -> Result<Element, JsValue> {
        let item_id = line.item.id;
        let product_id = line.item.product_id;
        let image = {
            let vm = self.vm.clone();
            lazy_image(&line.name(), async move { vm.product_image(product_id).await })?
        };
        let name = ElementBuilder::new("a")?
            .class("cart-item-name")
            .attr("href", &product_url(product_id))?
            .text(&line.name())
            .build();
        let minus = button("qty-btn", "−")?;
        let plus = button("qty-btn", "+")?;
        let remove = button("btn btn-danger", "Удалить")?;

        let row = ElementBuilder::new("div")?
            .class("cart-item")
            .child(image)?
            .child(name)?
            .child(ElementBuilder::new("span")?.class("cart-item-price").text(&line.price_label()).build())?
            .child(
                ElementBuilder::new("div")?
                    .class("qty-controls")
                    .child(minus.clone())?
                    .child(ElementBuilder::new("span")?.class("qty").text(&line.item.quantity.to_string()).build())?
                    .child(plus.clone())?
                    .build(),
            )?
            .child(remove.clone())?
            .build();

        {
            let (page, plus_btn) = (self.clone(), plus.clone());
            on_click(&plus, move |_| {
                let vm = page.vm.clone();
                page.mutate(&plus_btn, async move { vm.increment(item_id).await }, CART_ITEM_ADDED, CART_ADD_FAILED);
            })?;
        }
        {
            let (page, minus_btn) = (self.clone(), minus.clone());
            on_click(&minus, move |_| {
                if page.vm.decrement_needs_confirm(item_id) && !confirm(CART_REMOVE_CONFIRM) {
                    return;
                }
                let vm = page.vm.clone();
                page.mutate(&minus_btn, async move { vm.remove(item_id).await }, CART_ITEM_REMOVED, CART_REMOVE_FAILED);
            })?;
        }
        {
            let (page, remove_btn) = (self.clone(), remove.clone());
            on_click(&remove, move |_| {
                if !confirm(CART_REMOVE_CONFIRM) {
                    return;
                }
                let vm = page.vm.clone();
                page.mutate(&remove_btn, async move { vm.remove(item_id).await }, CART_ITEM_REMOVED, CART_REMOVE_FAILED);
            })?;
        }
        Ok(row)
    }

    /// Mutación + recarga; el snapshot devuelto ya viene del servidor
    fn mutate<F>(&self, trigger: &Element, call: F, success: &'static str, failure: &'static str)
    where
        F: std::future::Future<Output = ClientResult<CartUpdate>> + 'static,
    {
        let page = self.clone();
        let trigger = trigger.clone();
        let _ = set_disabled(&trigger, true);
        spawn_local(async move {
            match call.await {
                Ok(CartUpdate::Synced(snapshot)) => {
                    toast_success(success);
                    page.show(snapshot);
                }
                Ok(CartUpdate::ReloadFailed(e)) => {
                    toast_success(success);
                    toast_error(&e.user_message(&page.vm.reload_failed_message()));
                    let _ = set_disabled(&trigger, false);
                }
                Err(e) => {
                    log::error!("❌ [CART] {}: {}", failure, e);
                    toast_error(&e.user_message(failure));
                    let _ = set_disabled(&trigger, false);
                }
            }
        });
    }
}
