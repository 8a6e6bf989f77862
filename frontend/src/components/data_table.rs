use std::rc::Rc;

use yew::prelude::*;

use gestion_core::models::Keyed;

/// Colonne : clé, en-tête et rendu de cellule.
pub struct Columna<T> {
    pub clave: &'static str,
    pub titulo: &'static str,
    pub render: Rc<dyn Fn(&T) -> Html>,
}

impl<T> Columna<T> {
    pub fn new(clave: &'static str, titulo: &'static str, render: impl Fn(&T) -> Html + 'static) -> Self {
        Self { clave, titulo, render: Rc::new(render) }
    }

    /// Cellule texte simple.
    pub fn texto(clave: &'static str, titulo: &'static str, f: impl Fn(&T) -> String + 'static) -> Self {
        Self::new(clave, titulo, move |fila| html! { { f(fila) } })
    }
}

impl<T> Clone for Columna<T> {
    fn clone(&self) -> Self {
        Self { clave: self.clave, titulo: self.titulo, render: self.render.clone() }
    }
}

// le rendu est déterminé par la clé
impl<T> PartialEq for Columna<T> {
    fn eq(&self, other: &Self) -> bool {
        self.clave == other.clave && self.titulo == other.titulo
    }
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps<T: PartialEq> {
    pub columnas: Vec<Columna<T>>,
    pub filas: Vec<T>,
    #[prop_or_default]
    pub acciones: Option<Callback<T, Html>>,
    #[prop_or(AttrValue::from("No hay registros para mostrar"))]
    pub vacio: AttrValue,
}

const TH: &str = "text-align:left; padding:0.6rem; border-bottom:2px solid #ddd; background:#f5f6fa;";
const TD: &str = "padding:0.6rem; border-bottom:1px solid #eee;";

#[function_component(DataTable)]
pub fn data_table<T>(props: &DataTableProps<T>) -> Html
where
    T: Keyed + Clone + PartialEq + 'static,
{
    let total_columnas = props.columnas.len() + usize::from(props.acciones.is_some());

    html! {
        <table style="width:100%; border-collapse:collapse;">
            <thead>
                <tr>
                    { for props.columnas.iter().map(|c| html! { <th key={c.clave} style={TH}>{ c.titulo }</th> }) }
                    if props.acciones.is_some() {
                        <th style={TH}>{ "Acciones" }</th>
                    }
                </tr>
            </thead>
            <tbody>
                if props.filas.is_empty() {
                    <tr>
                        <td colspan={total_columnas.to_string()} style="padding:1.5rem; text-align:center; color:#777;">
                            { props.vacio.to_string() }
                        </td>
                    </tr>
                } else {
                    { for props.filas.iter().map(|fila| html! {
                        <tr key={fila.key()}>
                            { for props.columnas.iter().map(|c| html! {
                                <td key={c.clave} style={TD}>{ (c.render)(fila) }</td>
                            }) }
                            if let Some(acciones) = &props.acciones {
                                <td style={TD}>{ acciones.emit(fila.clone()) }</td>
                            }
                        </tr>
                    }) }
                }
            </tbody>
        </table>
    }
}
