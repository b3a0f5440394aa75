// ============================================================================
// MODERATOR VIEW - Gestión de productos por categoría
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlInputElement};
use crate::config::CONFIG;
use crate::dom::{clear_children, confirm, field_value, on_change, on_click, on_submit, set_disabled, set_field_value, set_text_content, set_visible, ElementBuilder};
use crate::error::{ClientError, ClientResult};
use crate::models::{Category, Product};
use crate::services::ImageUpload;
use crate::state::AppState;
use crate::utils::i18n::format_price;
use crate::viewmodels::moderator_viewmodel::*;
use crate::viewmodels::ModeratorViewModel;
use crate::views::shared::*;

const NO_PRODUCTS: &str = "В этой категории нет товаров";

#[derive(Clone)]
struct Panel {
    vm: ModeratorViewModel,
    table: Element,
    editor: Editor,
}

/// Formulario de alta/edición
#[derive(Clone)]
struct Editor {
    mode: Rc<Cell<FormMode>>,
    section: Element,
    title: Element,
    name: Element,
    description: Element,
    price: Element,
    stock: Element,
    category: Element,
    image: Element,
    error: Element,
    submit: Element,
}

pub fn render_moderator(root: &Element, state: &AppState) -> Result<(), JsValue> {
    log::info!("🛠️ [MODERATOR] render_moderator() llamado");
    let vm = ModeratorViewModel::new(state.api.clone());

    let logout = button("nav-btn", "Выйти")?;
    {
        let vm = vm.clone();
        on_click(&logout, move |_| vm.logout(&CONFIG.pages.login_page))?;
    }
    let header = render_header("Панель модератора", vec![logout])?;

    let category = category_select()?;
    set_field_value(&category, &vm.category());
    let create = button("btn btn-primary", "Добавить товар")?;
    let toolbar = ElementBuilder::new("div")?
        .class("moderator-toolbar")
        .child(labeled("Категория", &category)?)?
        .child(create.clone())?
        .build();
    let table = ElementBuilder::new("div")?.class("moderator-products").build();

    let panel = Panel { vm, table: table.clone(), editor: Editor::build()? };
    let main = ElementBuilder::new("main")?
        .class("moderator-page")
        .child(toolbar)?
        .child(panel.editor.section.clone())?
        .child(table)?
        .build();
    root.append_child(&header)?;
    root.append_child(&main)?;

    {
        let (panel, select) = (panel.clone(), category.clone());
        on_change(&category, move |_| {
            panel.vm.set_category(&field_value(&select));
            panel.reload();
        })?;
    }
    {
        let panel = panel.clone();
        on_click(&create, move |_| panel.editor.open(FormMode::Create, None))?;
    }
    panel.bind_editor()?;
    panel.reload();
    Ok(())
}

fn category_select() -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.class("form-input").attr("name", "category")?.build();
    for c in Category::ALL {
        select.append_child(&ElementBuilder::new("option")?.attr("value", c.code())?.text(c.label()).build())?;
    }
    Ok(select)
}

impl Panel {
    fn reload(&self) {
        let panel = self.clone();
        log_dom(fill_skeletons(&self.table, CONFIG.ui_config.grid_skeletons, "moderator-row skeleton"));
        spawn_local(async move {
            match panel.vm.reload().await {
                Ok(products) => panel.paint(&products),
                Err(e) => {
                    log::error!("❌ [MODERATOR] Error cargando productos: {}", e);
                    toast_error(&e.user_message(RELOAD_FAILED));
                    log_dom(show_empty(&panel.table, NO_PRODUCTS));
                }
            }
        });
    }

    fn paint(&self, products: &[Product]) {
        if products.is_empty() {
            log_dom(show_empty(&self.table, NO_PRODUCTS));
            return;
        }
        clear_children(&self.table);
        for product in products {
            match self.row(product) {
                Ok(row) => log_dom(self.table.append_child(&row).map(|_| ())),
                Err(e) => log::error!("❌ [MODERATOR] Error creando fila {}: {:?}", product.id, e),
            }
        }
    }

    /// Mutación terminada: toast y repintado (o aviso si la recarga falló)
    fn finish(&self, result: ClientResult<Reload>, success: &str, failure: &str) -> bool {
        match result {
            Ok(Reload::Done(products)) => {
                toast_success(success);
                self.paint(&products);
                true
            }
            Ok(Reload::Failed(e)) => {
                log::warn!("⚠️ [MODERATOR] Mutación OK pero recarga falló: {}", e);
                toast_success(success);
                toast_error(&e.user_message(RELOAD_FAILED));
                true
            }
            Err(e) => {
                log::error!("❌ [MODERATOR] {}: {}", failure, e);
                toast_error(&e.user_message(failure));
                false
            }
        }
    }

    fn row(&self, product: &Product) -> Result<Element, JsValue> {
        let id = product.id;
        let price = input("number", "price", "Цена")?;
        set_field_value(&price, &product.price.to_string());
        let save_price = button("btn btn-small", "💾")?;
        let stock = input("number", "stock", "Кол-во")?;
        set_field_value(&stock, &product.stock.to_string());
        let save_stock = button("btn btn-small", "💾")?;
        let edit = button("btn btn-secondary", "Изменить")?;
        let delete = button("btn btn-danger", "Удалить")?;

        let row = ElementBuilder::new("div")?
            .class("moderator-row")
            .child(ElementBuilder::new("span")?.class("row-name").text(&product.name).build())?
            .child(ElementBuilder::new("span")?.class("row-price").text(&format_price(product.price)).build())?
            .child(ElementBuilder::new("div")?.class("inline-edit").child(price.clone())?.child(save_price.clone())?.build())?
            .child(ElementBuilder::new("div")?.class("inline-edit").child(stock.clone())?.child(save_stock.clone())?.build())?
            .child(edit.clone())?
            .child(delete.clone())?
            .build();

        {
            let (panel, field, btn) = (self.clone(), price, save_price.clone());
            on_click(&save_price, move |_| {
                let raw = field_value(&field);
                if let Err(e) = parse_price(&raw) {
                    toast_error(&e.user_message(INVALID_PRICE));
                    return;
                }
                panel.spawn_mutation(&btn, PRICE_UPDATED, PRICE_UPDATE_FAILED, move |vm| async move {
                    vm.change_price(id, &raw).await
                });
            })?;
        }
        {
            let (panel, field, btn) = (self.clone(), stock, save_stock.clone());
            on_click(&save_stock, move |_| {
                let raw = field_value(&field);
                if let Err(e) = parse_stock(&raw) {
                    toast_error(&e.user_message(INVALID_STOCK));
                    return;
                }
                panel.spawn_mutation(&btn, STOCK_UPDATED, STOCK_UPDATE_FAILED, move |vm| async move {
                    vm.change_stock(id, &raw).await
                });
            })?;
        }
        {
            let panel = self.clone();
            on_click(&edit, move |_| match panel.vm.find(id) {
                Some(product) => panel.editor.open(FormMode::Edit(id), Some(&product)),
                None => toast_error(PRODUCT_NOT_FOUND),
            })?;
        }
        {
            let (panel, btn) = (self.clone(), delete.clone());
            on_click(&delete, move |_| {
                if !confirm(DELETE_CONFIRM) {
                    return;
                }
                panel.spawn_mutation(&btn, PRODUCT_DELETED, DELETE_FAILED, move |vm| async move { vm.delete(id).await });
            })?;
        }
        Ok(row)
    }

    fn spawn_mutation<F, Fut>(&self, trigger: &Element, success: &'static str, failure: &'static str, call: F)
    where
        F: FnOnce(ModeratorViewModel) -> Fut + 'static,
        Fut: std::future::Future<Output = ClientResult<Reload>> + 'static,
    {
        let (panel, trigger) = (self.clone(), trigger.clone());
        log_dom(set_disabled(&trigger, true));
        spawn_local(async move {
            let result = call(panel.vm.clone()).await;
            if !panel.finish(result, success, failure) {
                log_dom(set_disabled(&trigger, false));
            }
        });
    }

    fn bind_editor(&self) -> Result<(), JsValue> {
        let form = self.editor.section.first_element_child().ok_or_else(|| JsValue::from_str("Editor without form"))?;
        let panel = self.clone();
        on_submit(&form, move || {
            let editor = panel.editor.clone();
            show_inline_error(&editor.error, None);
            let values = editor.values();
            if let Err(e) = values.validate() {
                show_inline_error(&editor.error, Some(&e.user_message(SAVE_FAILED)));
                return;
            }
            let mode = editor.mode.get();
            set_busy(&editor.submit, true, "Сохранение...");
            let panel = panel.clone();
            spawn_local(async move {
                let image = match mode {
                    FormMode::Create => read_image(&editor.image).await,
                    FormMode::Edit(_) => Ok(None),
                };
                let result = match image {
                    Ok(image) => panel.vm.save(mode, &values, image).await,
                    Err(e) => Err(e),
                };
                let success = if mode == FormMode::Create { PRODUCT_CREATED } else { PRODUCT_UPDATED };
                if panel.finish(result, success, SAVE_FAILED) {
                    editor.close();
                }
                set_busy(&editor.submit, false, "Сохранить");
            });
        })?;

        let editor = self.editor.clone();
        let cancel = self
            .editor
            .section
            .query_selector(".editor-cancel")?
            .ok_or_else(|| JsValue::from_str("Editor without cancel button"))?;
        on_click(&cancel, move |_| editor.close())
    }
}

impl Editor {
    fn build() -> Result<Self, JsValue> {
        let description = ElementBuilder::new("textarea")?
            .class("form-input")
            .attr("name", "description")?
            .attr("placeholder", "Описание")?
            .build();
        let image = input("file", "image", "")?;
        image.set_attribute("accept", "image/*")?;
        let editor = Self {
            mode: Rc::new(Cell::new(FormMode::Create)),
            section: ElementBuilder::new("section")?.class("product-editor").build(),
            title: ElementBuilder::new("h2")?.build(),
            name: input("text", "name", "Название")?,
            description,
            price: input("number", "price", "Цена")?,
            stock: input("number", "stock", "Количество")?,
            category: category_select()?,
            image,
            error: inline_error()?,
            submit: submit_button("Сохранить")?,
        };
        let form = ElementBuilder::new("form")?
            .class("editor-form")
            .child(editor.title.clone())?
            .child(labeled("Название", &editor.name)?)?
            .child(labeled("Описание", &editor.description)?)?
            .child(labeled("Цена", &editor.price)?)?
            .child(labeled("Количество", &editor.stock)?)?
            .child(labeled("Категория", &editor.category)?)?
            .child(labeled("Изображение", &editor.image)?)?
            .child(editor.error.clone())?
            .child(editor.submit.clone())?
            .child(button("btn btn-secondary editor-cancel", "Отмена")?)?
            .build();
        editor.section.append_child(&form)?;
        set_visible(&editor.section, false, "block")?;
        Ok(editor)
    }

    fn open(&self, mode: FormMode, product: Option<&Product>) {
        self.mode.set(mode);
        set_text_content(&self.title, mode.title());
        let values = product.map(ProductForm::from_product).unwrap_or_default();
        set_field_value(&self.name, &values.name);
        set_field_value(&self.description, &values.description);
        set_field_value(&self.price, &values.price);
        set_field_value(&self.stock, &values.stock);
        set_field_value(&self.image, "");
        if mode == FormMode::Create {
            set_field_value(&self.category, Category::default().code());
        } else {
            set_field_value(&self.category, &values.category);
        }
        let locked = mode.locks_category_and_image();
        log_dom(set_disabled(&self.category, locked));
        log_dom(set_disabled(&self.image, locked));
        show_inline_error(&self.error, None);
        log_dom(set_visible(&self.section, true, "block"));
    }

    fn close(&self) {
        log_dom(set_visible(&self.section, false, "block"));
    }

    fn values(&self) -> ProductForm {
        ProductForm {
            name: field_value(&self.name),
            description: field_value(&self.description),
            price: field_value(&self.price),
            stock: field_value(&self.stock),
            category: field_value(&self.category),
        }
    }
}

/// Bytes del archivo elegido, `None` si no se eligió ninguno
async fn read_image(input: &Element) -> ClientResult<Option<ImageUpload>> {
    let Some(file) = input
        .dyn_ref::<HtmlInputElement>()
        .and_then(|i| i.files())
        .and_then(|files| files.get(0))
    else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ClientError::Dom(format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    log::info!("🖼️ [MODERATOR] Imagen {} ({} bytes)", file.name(), bytes.len());
    Ok(Some(ImageUpload {
        filename: file.name(),
        content_type: file.type_(),
        bytes,
    }))
}

fn log_dom(result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("❌ [MODERATOR] Error de DOM: {:?}", e);
    }
}
