use yew::prelude::*;

use gestion_core::crud::Modal as EstadoModal;
use gestion_core::forms::{FormContext, FormMode, PersonaEnvio, PersonaForm};
use gestion_core::models::{o_guion, DetallePersona, Keyed, Persona, TipoBecario, TipoPersona, TipoPersonal};
use gestion_core::FieldErrors;

use super::{acciones, alerta, cabecera, cerrar_modal, error_de, guardar, listado, opciones_grupos, titulo_modal};
use crate::components::{BotonesModal, Campo, Columna, Modal, Seleccion};
use crate::config::PAGE_PERSONAS;
use crate::hooks::{use_entity_page, use_grupos};

/* -------------------------------------------------------------------------- */
/*                     champs propres à chaque variante                        */
/* -------------------------------------------------------------------------- */

/// Rendu des champs spécifiques d'une variante ; partagé avec la création
/// d'utilisateurs.
pub fn campos_variante(
    form: &PersonaForm,
    on_campo: impl Fn(&'static str) -> Callback<String>,
    solo_lectura: bool,
    errores: &FieldErrors,
) -> Html {
    let campo = |clave: &'static str, etiqueta: &'static str| {
        html! {
            <Campo etiqueta={etiqueta} valor={form.get(clave).to_string()} on_cambio={on_campo(clave)}
                {solo_lectura} error={error_de(errores, clave)} />
        }
    };

    match form.tipo() {
        TipoPersona::Becario => {
            let opciones = TipoBecario::ALL
                .into_iter()
                .map(|t| (t.as_str().to_string(), t.label().to_string()))
                .collect::<Vec<_>>();
            html! {
                <>
                    { campo("fuenteFinanciamiento", "Fuente de financiamiento") }
                    <Seleccion etiqueta="Tipo de becario" valor={form.get("tipoBecario").to_string()} {opciones}
                        on_cambio={on_campo("tipoBecario")} {solo_lectura} error={error_de(errores, "tipoBecario")} />
                </>
            }
        }
        TipoPersona::Investigador => html! {
            <>
                { campo("categoriaUTN", "Categoría UTN") }
                { campo("programaDeIncentivos", "Programa de incentivos") }
                { campo("dedicacion", "Dedicación") }
                { campo("gradoAcademico", "Grado académico") }
            </>
        },
        TipoPersona::Personal => {
            let opciones = TipoPersonal::ALL
                .into_iter()
                .map(|t| (t.as_str().to_string(), t.label().to_string()))
                .collect::<Vec<_>>();
            html! {
                <Seleccion etiqueta="Tipo de personal" valor={form.get("tipoPersonal").to_string()} {opciones}
                    on_cambio={on_campo("tipoPersonal")} {solo_lectura} error={error_de(errores, "tipoPersonal")} />
            }
        }
        TipoPersona::IntegranteConsejoEducativo => campo("cargo", "Cargo"),
    }
}

/* -------------------------------------------------------------------------- */
/*                                 formulaire                                  */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
struct PersonaFormProps {
    modo: FormMode,
    tipo: TipoPersona,
    registro: Option<Persona>,
    ctx: FormContext,
    enviando: bool,
    on_enviar: Callback<PersonaEnvio>,
    on_cancelar: Callback<()>,
}

#[function_component(PersonaFormulario)]
fn persona_formulario(props: &PersonaFormProps) -> Html {
    let grupos = use_grupos();
    let form = {
        let (registro, tipo) = (props.registro.clone(), props.tipo);
        use_state(move || PersonaForm::desde(registro.as_ref(), tipo))
    };
    let errores = use_state(FieldErrors::new);
    let solo_lectura = props.modo.solo_lectura();

    let on_campo = |campo: &'static str| {
        let form = form.clone();
        Callback::from(move |valor: String| {
            let mut siguiente = (*form).clone();
            siguiente.set(campo, valor);
            form.set(siguiente);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let errores = errores.clone();
        let on_enviar = props.on_enviar.clone();
        let ctx = props.ctx.clone();
        let modo = props.modo;
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            if modo.solo_lectura() {
                return;
            }
            match form.validar(&ctx, modo) {
                Ok(envio) => {
                    errores.set(FieldErrors::new());
                    on_enviar.emit(envio);
                }
                Err(e) => errores.set(e),
            }
        })
    };

    let grupo = if props.ctx.ve_varios_grupos() && props.modo == FormMode::Crear {
        html! {
            <Seleccion etiqueta="Grupo" valor={form.oid_grupo.clone()} opciones={opciones_grupos(&grupos)}
                on_cambio={on_campo("oidGrupo")} requerido=true error={error_de(&errores, "oidGrupo")} />
        }
    } else {
        match props.registro.as_ref().and_then(|p| p.nombre_grupo.clone()) {
            Some(nombre) => html! {
                <Campo etiqueta="Grupo" valor={nombre} on_cambio={Callback::noop()} solo_lectura=true />
            },
            None => Html::default(),
        }
    };

    html! {
        <form {onsubmit}>
            <Campo etiqueta="Nombre" valor={form.nombre.clone()} on_cambio={on_campo("nombre")}
                {solo_lectura} error={error_de(&errores, "nombre")} />
            <Campo etiqueta="Apellido" valor={form.apellido.clone()} on_cambio={on_campo("apellido")}
                {solo_lectura} error={error_de(&errores, "apellido")} />
            <Campo etiqueta="Horas semanales" tipo="number" valor={form.horas_semanales.clone()}
                on_cambio={on_campo("horasSemanales")} {solo_lectura} error={error_de(&errores, "horasSemanales")} />
            { grupo }
            { campos_variante(&form, on_campo, solo_lectura, &errores) }
            <BotonesModal modo={props.modo} on_cancelar={props.on_cancelar.clone()} enviando={props.enviando} />
        </form>
    }
}

/* -------------------------------------------------------------------------- */
/*                                    page                                     */
/* -------------------------------------------------------------------------- */

fn columnas_variante(tipo: TipoPersona) -> Vec<Columna<Persona>> {
    match tipo {
        TipoPersona::Becario => vec![
            Columna::texto("tipoBecario", "Tipo de becario", |p: &Persona| match &p.detalle {
                DetallePersona::Becario { tipo_becario, .. } => TipoBecario::formatear(tipo_becario.as_deref()),
                _ => "-".to_string(),
            }),
            Columna::texto("fuenteFinanciamiento", "Financiamiento", |p: &Persona| match &p.detalle {
                DetallePersona::Becario { fuente_financiamiento, .. } => o_guion(fuente_financiamiento.as_deref()),
                _ => "-".to_string(),
            }),
        ],
        TipoPersona::Investigador => vec![
            Columna::texto("categoriaUTN", "Categoría UTN", |p: &Persona| match &p.detalle {
                DetallePersona::Investigador { categoria_utn, .. } => o_guion(categoria_utn.as_deref()),
                _ => "-".to_string(),
            }),
            Columna::texto("dedicacion", "Dedicación", |p: &Persona| match &p.detalle {
                DetallePersona::Investigador { dedicacion, .. } => o_guion(dedicacion.as_deref()),
                _ => "-".to_string(),
            }),
        ],
        TipoPersona::Personal => vec![Columna::texto("tipoPersonal", "Tipo", |p: &Persona| match &p.detalle {
            DetallePersona::Personal { tipo_personal } => TipoPersonal::formatear(tipo_personal.as_deref()),
            _ => "-".to_string(),
        })],
        TipoPersona::IntegranteConsejoEducativo => {
            vec![Columna::texto("cargo", "Cargo", |p: &Persona| match &p.detalle {
                DetallePersona::IntegranteConsejoEducativo { cargo } => o_guion(cargo.as_deref()),
                _ => "-".to_string(),
            })]
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PersonasPageProps {
    /// Segment d'URL : becarios, investigadores, personal…
    pub tipo: String,
}

#[function_component(PersonasPage)]
pub fn personas_page(props: &PersonasPageProps) -> Html {
    let tipo = TipoPersona::ALL
        .into_iter()
        .find(|t| t.entidad().as_str() == props.tipo);
    let Some(tipo) = tipo else {
        return html! { <h1>{ "Tipo de persona desconocido" }</h1> };
    };
    html! { <ListaPersonas key={tipo.as_str()} {tipo} /> }
}

#[derive(Properties, PartialEq)]
struct ListaPersonasProps {
    tipo: TipoPersona,
}

#[function_component(ListaPersonas)]
fn lista_personas(props: &ListaPersonasProps) -> Html {
    let tipo = props.tipo;
    let page = use_entity_page::<Persona>(tipo.entidad(), PAGE_PERSONAS);

    let mut columnas = vec![
        Columna::texto("nombre", "Nombre", |p: &Persona| p.nombre.clone()),
        Columna::texto("apellido", "Apellido", |p: &Persona| p.apellido.clone()),
        Columna::texto("horasSemanales", "Horas semanales", |p: &Persona| {
            p.horas_semanales.map_or_else(|| "-".to_string(), |h| h.to_string())
        }),
    ];
    if page.ve_varios_grupos() {
        columnas.push(Columna::texto("grupo", "Grupo", |p: &Persona| o_guion(p.nombre_grupo.as_deref())));
    }
    columnas.extend(columnas_variante(tipo));

    let confirmacion = format!("¿Seguro que querés desactivar este {}?", tipo.singular().to_lowercase());
    let acciones = acciones(&page, confirmacion, None);

    let modal = match &page.state().modal {
        EstadoModal::Cerrado => Html::default(),
        EstadoModal::Abierto { modo, registro } => {
            let modo = *modo;
            let on_enviar = {
                let page = page.clone();
                let id = registro.as_ref().map(Keyed::key);
                Callback::from(move |envio: PersonaEnvio| guardar(&page, modo, id, envio.grupo, envio.payload))
            };
            html! {
                <Modal titulo={titulo_modal(modo, tipo.singular())} on_cerrar={cerrar_modal(&page)}>
                    <PersonaFormulario {modo} {tipo} registro={registro.clone()} ctx={page.ctx()}
                        enviando={page.state().enviando} {on_enviar} on_cancelar={cerrar_modal(&page)} />
                </Modal>
            }
        }
    };

    html! {
        <div>
            { cabecera(&page, tipo.plural(), &format!("Nuevo {}", tipo.singular())) }
            { listado(&page, columnas, acciones, &format!("No hay {} para mostrar", tipo.plural().to_lowercase())) }
            { modal }
            { alerta(&page) }
        </div>
    }
}
