// ============================================================================
// ORDERS VIEW - Pedidos con estado, líneas y acciones pagar/cancelar
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::Page;
use crate::dom::{clear_children, confirm, on_click, set_disabled, ElementBuilder};
use crate::error::ClientResult;
use crate::models::Order;
use crate::state::AppState;
use crate::utils::i18n::format_price;
use crate::viewmodels::orders_viewmodel::*;
use crate::viewmodels::OrdersViewModel;
use crate::views::shared::*;

const NO_ORDERS: &str = "У вас пока нет заказов";

pub fn render_orders(root: &Element, state: &AppState) -> Result<(), JsValue> {
    log::info!("📋 [ORDERS] render_orders() llamado");
    let header = render_header(
        "Мои заказы",
        vec![nav_button(state, "🏠 Каталог", Page::Home)?, nav_button(state, "👤 Профиль", Page::Profile)?, cart_button(state)?],
    )?;
    let list = ElementBuilder::new("div")?.class("orders-list").build();
    root.append_child(&header)?;
    root.append_child(&ElementBuilder::new("main")?.class("orders-page").child(list.clone())?.build())?;

    fill_skeletons(&list, ORDER_SKELETONS, "order-card skeleton")?;
    let vm = OrdersViewModel::new(state.api.clone());
    spawn_local(async move {
        let result = vm.load().await;
        if let Err(e) = &result {
            toast_error(&e.user_message(ORDERS_LOAD_FAILED));
        }
        show_orders(&list, &vm, result);
    });
    Ok(())
}

/// Lista, o estado vacío si no hay pedidos o la carga falló
fn show_orders(list: &Element, vm: &OrdersViewModel, result: ClientResult<Vec<Order>>) {
    let painted = match result {
        Ok(orders) if !orders.is_empty() => paint_orders(list, vm, &orders),
        Ok(_) => show_empty(list, NO_ORDERS),
        Err(e) => {
            log::error!("❌ [ORDERS] Error cargando pedidos: {}", e);
            show_empty(list, NO_ORDERS)
        }
    };
    if let Err(e) = painted {
        log::error!("❌ [ORDERS] Error de DOM: {:?}", e);
    }
}

fn paint_orders(list: &Element, vm: &OrdersViewModel, orders: &[Order]) -> Result<(), JsValue> {
    clear_children(list);
    for order in orders {
        let card = order_card(list, vm, order)?;
        list.append_child(&card)?;
    }
    Ok(())
}

fn order_card(list: &Element, vm: &OrdersViewModel, order: &Order) -> Result<Element, JsValue> {
    let status = ElementBuilder::new("span")?
        .class("status-badge")
        .attr("style", &format!("background-color: {}", order.status_color()))?
        .text(&order.status_label())
        .build();
    let head = ElementBuilder::new("div")?
        .class("order-head")
        .child(ElementBuilder::new("h3")?.text(&order_title(order)).build())?
        .child(status)?
        .build();

    let lines = ElementBuilder::new("ul")?.class("order-lines").build();
    for product in &order.products {
        let line = ElementBuilder::new("li")?
            .child(ElementBuilder::new("span")?.class("line-name").text(&product.display_name()).build())?
            .child(ElementBuilder::new("span")?.class("line-qty").text(&quantity_label(product.quantity)).build())?
            .child(ElementBuilder::new("span")?.class("line-price").text(&format_price(product.line_total())).build())?
            .build();
        lines.append_child(&line)?;
    }

    let actions = ElementBuilder::new("div")?.class("order-actions").build();
    if order.can_pay() {
        let pay = button("btn btn-primary", "Оплатить")?;
        let (vm, list, order, btn) = (vm.clone(), list.clone(), order.clone(), pay.clone());
        on_click(&pay, move |_| {
            let _ = set_disabled(&btn, true);
            let (vm, list, order, btn) = (vm.clone(), list.clone(), order.clone(), btn.clone());
            spawn_local(async move {
                after_action(&list, &vm, &btn, vm.pay(&order).await, ORDER_PAID, ORDER_PAY_FAILED);
            });
        })?;
        actions.append_child(&pay)?;
    }
    if order.can_cancel() {
        let cancel = button("btn btn-danger", "Отменить")?;
        let (vm, list, order, btn) = (vm.clone(), list.clone(), order.clone(), cancel.clone());
        on_click(&cancel, move |_| {
            if !confirm(ORDER_CANCEL_CONFIRM) {
                return;
            }
            let _ = set_disabled(&btn, true);
            let (vm, list, order, btn) = (vm.clone(), list.clone(), order.clone(), btn.clone());
            spawn_local(async move {
                after_action(&list, &vm, &btn, vm.cancel(&order).await, ORDER_CANCELLED, ORDER_CANCEL_FAILED);
            });
        })?;
        actions.append_child(&cancel)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("order-card")
        .child(head)?
        .child(lines)?
        .child(ElementBuilder::new("p")?.class("order-total").text(&format!("Итого: {}", format_price(order.total()))).build())?
        .child(actions)?
        .build())
}

fn after_action(
    list: &Element,
    vm: &OrdersViewModel,
    trigger: &Element,
    result: ClientResult<Vec<Order>>,
    success: &str,
    failure: &str,
) {
    match result {
        Ok(orders) => {
            toast_success(success);
            show_orders(list, vm, Ok(orders));
        }
        Err(e) => {
            log::error!("❌ [ORDERS] {}: {}", failure, e);
            toast_error(&e.user_message(failure));
            let _ = set_disabled(trigger, false);
        }
    }
}
