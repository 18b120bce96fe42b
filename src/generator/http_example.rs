//! Handler-stub generation for web services.
//!
//! For each server-enabled web service, emits one `.ex.example` scaffold
//! file per resource: a `@spec`/`def` skeleton with derived parameters and
//! guards, an optional access precondition, and a hint-driven CRUD body.
//! The first resource's file additionally embeds the service's
//! deduplicated, sorted route table.

use crate::elixir::{self, ElixirFile};
use crate::model::{
    AttrKey, Attributed, Module, PathSegment, Resource, SessionKind, WebServiceForm,
};
use crate::notation::{to_camel_case, to_snake_case};
use crate::render::Renderer;

const DIVIDER: &str =
    "# ----------------------------------------------------------------------------";

/// Placeholder separating path variables from literal segment text while
/// routes are grouped and sorted; swapped for `:` in the final table.
const VAR_MARK: char = '\u{00fe}';

/// One entry of a service's route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub uri: String,
    pub module: String,
}

/// A derived callable parameter or result variable.
#[derive(Debug, Clone)]
struct Variable {
    name: String,
    ty: String,
    guard: Option<String>,
    annotation: Option<String>,
}

/// Generates handler-stub scaffold files for web services.
#[derive(Debug, Default)]
pub struct HandlerStubGenerator;

impl HandlerStubGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate stub files for every server-enabled service of `module`.
    pub fn generate(&self, module: &Module) -> Vec<ElixirFile> {
        let mut files = Vec::new();
        for service in &module.services {
            if !service.server_enabled {
                tracing::debug!(service = %service.name, "web server disabled, skipping");
                continue;
            }
            files.extend(self.generate_service(module, service));
        }
        files
    }

    fn generate_service(&self, module: &Module, service: &WebServiceForm) -> Vec<ElixirFile> {
        // The route table is computed once per service and handed to the
        // per-resource emission; only the first resource's file embeds it.
        let routes = handled_routes(module, service);
        service
            .resources
            .iter()
            .enumerate()
            .map(|(index, resource)| {
                let shared = if index == 0 { Some(&routes) } else { None };
                self.emit_resource(module, service, resource, shared)
            })
            .collect()
    }

    fn emit_resource(
        &self,
        module: &Module,
        service: &WebServiceForm,
        resource: &Resource,
        routes: Option<&Vec<Route>>,
    ) -> ElixirFile {
        let callback = callback_module(module, service, resource);
        let default_name = format!("{}.ex.example", to_snake_case(&callback));
        let file_name = resource
            .attr(AttrKey::HttpExample)
            .or_else(|| service.attr(AttrKey::HttpExample))
            .unwrap_or(&default_name)
            .to_string();

        let mut file = ElixirFile::new(file_name, callback);
        file.behaviour = Some(elixir::module_name(&[
            &module.name,
            &to_camel_case(&service.name),
        ]));
        file.annotation = service.annotation.clone();

        let (call_vars, result_vars) = self.assemble_variables(resource, &mut file);
        let result_type = match result_vars.len() {
            0 => "any".to_string(),
            1 => result_vars[0].ty.clone(),
            _ => format!(
                "{{{}}}",
                result_vars
                    .iter()
                    .map(|v| v.ty.clone())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        if let Some(routes) = routes {
            file.block(DIVIDER);
            file.block(
                "defmacro __using__(which) when is_atom(which), do: apply(__MODULE__, which, [])",
            );
            file.block(render_router(routes));
        }
        file.block(DIVIDER);

        let body = self.render_function(service, resource, &call_vars, &result_type);
        file.function(body, resource.annotation.clone());
        file
    }

    /// Build the ordered callable parameter list and result variables.
    ///
    /// Order matters: request content, request variables, session, conn.
    /// CRUD delegate arguments are later derived from this same order.
    fn assemble_variables(
        &self,
        resource: &Resource,
        file: &mut ElixirFile,
    ) -> (Vec<Variable>, Vec<Variable>) {
        let mut call_vars = Vec::new();
        let mut result_vars = Vec::new();

        if let Some(content) = &resource.request_content {
            let name = content.var_name.clone().unwrap_or_else(|| "request_content".to_string());
            call_vars.push(Variable {
                guard: elixir::guard_expr(&content.ty, &name),
                ty: content.ty.clone(),
                annotation: content.annotation.clone(),
                name,
            });
        }

        for var in &resource.request_vars {
            let guard_ty = var.guard_ty.as_deref().unwrap_or(&var.ty);
            if let Some(require) = elixir::guard_requires(guard_ty) {
                file.require(require);
            }
            call_vars.push(Variable {
                name: var.name.clone(),
                ty: var.ty.clone(),
                guard: elixir::guard_expr(guard_ty, &var.name),
                annotation: var.annotation.clone(),
            });
        }

        if let Some(ok) = resource.success_response() {
            for var in &ok.header_vars {
                result_vars.push(Variable {
                    name: var.name.clone(),
                    ty: var.ty.clone(),
                    guard: None,
                    annotation: None,
                });
            }
            if let Some(content) = &ok.content {
                result_vars.push(Variable {
                    name: content
                        .var_name
                        .clone()
                        .unwrap_or_else(|| "response_content".to_string()),
                    ty: content.ty.clone(),
                    guard: None,
                    annotation: None,
                });
            }
        }

        match &resource.session {
            SessionKind::Keyed(_) => call_vars.push(Variable {
                name: "session".to_string(),
                ty: "any()".to_string(),
                guard: None,
                annotation: None,
            }),
            SessionKind::Generic => call_vars.push(Variable {
                name: "session".to_string(),
                ty: "%{optional(String.t()) => any()}".to_string(),
                guard: None,
                annotation: None,
            }),
            SessionKind::None => {}
        }

        if resource.conn {
            call_vars.push(Variable {
                name: "conn".to_string(),
                ty: "Plug.Conn.t()".to_string(),
                guard: None,
                annotation: None,
            });
            result_vars.push(Variable {
                name: "conn".to_string(),
                ty: "Plug.Conn.t()".to_string(),
                guard: None,
                annotation: None,
            });
        }

        (call_vars, result_vars)
    }

    fn render_function(
        &self,
        service: &WebServiceForm,
        resource: &Resource,
        call_vars: &[Variable],
        result_type: &str,
    ) -> String {
        let mut r = Renderer::new();

        if call_vars.is_empty() {
            r.line(format!("@spec {}() :: {}", resource.name, result_type));
        } else {
            r.line(format!("@spec {}(", resource.name));
            r.indented(|r| {
                r.blocks(
                    call_vars.iter().map(|v| format!("{} :: {}", v.name, v.ty)),
                    ",",
                );
            });
            r.line(format!(") :: {}", result_type));
        }

        r.line("@impl true");
        if call_vars.is_empty() {
            r.line(format!("def {}()", resource.name));
        } else {
            r.line(format!("def {}(", resource.name));
            r.indented(|r| {
                let rows: Vec<(String, Option<String>)> = call_vars
                    .iter()
                    .map(|v| {
                        (
                            v.name.clone(),
                            v.annotation.as_ref().map(|a| format!("# {a}")),
                        )
                    })
                    .collect();
                r.table(&rows, ",");
            });
            if call_vars.iter().any(|v| v.guard.is_some()) {
                r.line(") when");
                r.indented(|r| {
                    r.blocks(call_vars.iter().filter_map(|v| v.guard.clone()), " and");
                });
            } else {
                r.line(")");
            }
        }

        r.line("do");
        r.indented(|r| self.render_body(r, service, resource, call_vars));
        r.line("end");
        r.build()
    }

    /// Emit exactly one body path: access precondition first when present,
    /// then the hinted CRUD delegation or the not-implemented sentinel.
    fn render_body(
        &self,
        r: &mut Renderer,
        service: &WebServiceForm,
        resource: &Resource,
        call_vars: &[Variable],
    ) {
        if let Some(predicate) = resource
            .attr(AttrKey::HttpIf)
            .or_else(|| service.attr(AttrKey::HttpIf))
        {
            let cond_var = if resource.session.is_some() {
                "session"
            } else {
                "api_key"
            };
            r.line(format!(
                "unless {predicate}({cond_var}), do: raise DataProtocol.ForbiddenError"
            ));
        }

        let Some(hint) = resource.attr(AttrKey::HttpHint) else {
            r.line("raise \"not_yet_implemented\"");
            return;
        };

        // context module comes from the first component of the service name
        let ctx = delegate_context(&service.name);
        let args = delegate_arguments(resource, call_vars);
        let op = &resource.name;

        let content_ty = resource
            .success_response()
            .and_then(|ok| ok.content.as_ref())
            .map(|c| c.ty.as_str());
        let result_struct = content_ty.map(result_struct_name);

        match (hint, content_ty, result_struct) {
            ("list", Some(ty), Some(name)) if ty.contains(".CollectionSlice.t(") => {
                r.line(format!("items = {ctx}.{op}({args})"));
                r.line(format!(
                    "total = {ctx}.{}({args})",
                    op.replace("get_", "count_")
                ));
                r.line(format!("%{name}{{items: items, total: total}}"));
            }
            ("list", Some(ty), Some(name)) if ty.contains(".Collection.t(") => {
                r.line(format!("items = {ctx}.{op}({args})"));
                r.line(format!("%{name}{{items: items}}"));
            }
            ("read", _, _) => {
                r.line(format!("item = {ctx}.{op}!({args})"));
                r.line("# log_user_action(session, :read, item)");
                r.line("item");
            }
            ("create", _, _) => {
                r.line(format!("item = {ctx}.{op}!(Map.from_struct({args}))"));
                r.line("# log_user_action(session, :create, item)");
                r.line("item");
            }
            ("update", _, _) => {
                r.line(format!("item = {ctx}.{op}!({args})"));
                r.line("# log_user_action(session, :update, item)");
                r.line("item");
            }
            ("delete", _, Some(name)) => {
                // fetch before deleting so the entity's prior state is
                // available to the audit hook
                r.line(format!(
                    "item = {ctx}.{}!({args})",
                    op.replace("delete_", "get_")
                ));
                r.line(format!(":ok = {ctx}.{op}!({args})"));
                r.line("# log_user_action(session, :delete, item)");
                r.line(format!("%{name}{{result: true}}"));
            }
            // unrecognized hint or response shape: keep the batch going
            _ => r.line("raise \"not_yet_implemented\""),
        }
    }
}

/// Compute a service's route table: URIs joined from path segments, grouped
/// so routes sharing a URI collapse to the first-encountered handler, in
/// strict ordinal URI order.
pub fn handled_routes(module: &Module, service: &WebServiceForm) -> Vec<Route> {
    let mut by_uri: Vec<Route> = Vec::new();
    for resource in &service.resources {
        let uri = std::iter::once(String::new())
            .chain(resource.path.iter().map(|seg| match seg {
                PathSegment::Literal(s) => s.clone(),
                PathSegment::Variable(name) => format!("{VAR_MARK}{name}"),
            }))
            .collect::<Vec<_>>()
            .join("/");
        if !by_uri.iter().any(|r| r.uri == uri) {
            by_uri.push(Route {
                uri,
                module: callback_module(module, service, resource),
            });
        }
    }
    by_uri.sort_by(|a, b| a.uri.cmp(&b.uri));
    for route in &mut by_uri {
        route.uri = route.uri.replace(VAR_MARK, ":");
    }
    by_uri
}

fn render_router(routes: &[Route]) -> String {
    let mut r = Renderer::new();
    r.line("def router() do");
    r.indented(|r| {
        r.line("quote do");
        r.indented(|r| {
            for route in routes {
                r.line(format!("match \"{}\", to: {}", route.uri, route.module));
            }
        });
        r.line("end");
    });
    r.line("end");
    r.build()
}

fn callback_module(module: &Module, service: &WebServiceForm, resource: &Resource) -> String {
    let leaf = resource
        .handler
        .clone()
        .unwrap_or_else(|| format!("{}Handler", to_camel_case(&resource.name)));
    elixir::module_name(&[&module.name, &to_camel_case(&service.name), &leaf])
}

/// Delegate target module: the first underscore-delimited token of the
/// service name, upper-camel.
fn delegate_context(service_name: &str) -> String {
    let snake = to_snake_case(service_name);
    let first = snake.split('_').next().unwrap_or_default();
    to_camel_case(first)
}

/// Delegate argument list: parameter names minus `api_key` (and minus
/// `session` when the resource carries a session marker), with the
/// request-content name moved to the end regardless of position.
fn delegate_arguments(resource: &Resource, call_vars: &[Variable]) -> String {
    let content_name = resource
        .request_content
        .as_ref()
        .map(|c| c.var_name.clone().unwrap_or_else(|| "request_content".to_string()));
    let mut names: Vec<&str> = call_vars
        .iter()
        .map(|v| v.name.as_str())
        .filter(|n| *n != "api_key")
        .collect();
    if resource.session.is_some() {
        names.retain(|n| *n != "session");
    }
    if let Some(content_name) = &content_name {
        names.retain(|n| *n != content_name.as_str());
        names.push(content_name.as_str());
    }
    names.join(", ")
}

fn result_struct_name(ty: &str) -> String {
    ty.replace(".t(", "-")
        .split('-')
        .next()
        .unwrap_or_default()
        .to_string()
}
