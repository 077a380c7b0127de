use std::collections::HashSet;
use swc_ecma_ast::*;
use tracing::debug;

/// Module the client factory is imported from
pub const CLIENT_MODULE: &str = "openapi-fetch";

/// Name of the client factory symbol
pub const CLIENT_FACTORY: &str = "createClient";

/// Binding name assumed when the factory import is absent. Legacy default,
/// kept overridable through [`client_bindings_with_default`].
pub const DEFAULT_BINDING: &str = "client";

/// Determines which local identifiers in a file are instances of the
/// recognized HTTP client. See [`client_bindings_with_default`].
pub fn client_bindings(module: &Module) -> HashSet<String> {
    client_bindings_with_default(module, DEFAULT_BINDING)
}

/// Like [`client_bindings`], with an explicit fallback binding name.
///
/// If the factory is not imported from the client module, the fallback name
/// alone is returned and no declaration scan happens. Otherwise every variable
/// declared as a direct call to the imported factory contributes its name;
/// when no such declaration exists the fallback applies again. The result is
/// always non-empty.
pub fn client_bindings_with_default(module: &Module, default_binding: &str) -> HashSet<String> {
    let Some(factory_local) = imported_factory_local(module) else {
        return HashSet::from([default_binding.to_string()]);
    };

    let mut bindings = HashSet::new();
    collect_factory_declarations(module, &factory_local, &mut bindings);

    if bindings.is_empty() {
        debug!(
            factory = %factory_local,
            "Client factory imported but never assigned, falling back to default binding"
        );
        bindings.insert(default_binding.to_string());
    }

    bindings
}

/// Local name under which the client factory is imported, if at all.
///
/// Matches `import { createClient } from "openapi-fetch"` (including
/// `createClient as alias`) and `import createClient from "openapi-fetch"`.
fn imported_factory_local(module: &Module) -> Option<String> {
    for item in &module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import_decl)) = item else {
            continue;
        };
        if import_decl.src.value.as_str().unwrap_or("") != CLIENT_MODULE {
            continue;
        }

        for specifier in &import_decl.specifiers {
            match specifier {
                ImportSpecifier::Named(named) => {
                    let imported_name = match &named.imported {
                        Some(ModuleExportName::Ident(ident)) => ident.sym.as_ref(),
                        Some(ModuleExportName::Str(s)) => s.value.as_str().unwrap_or(""),
                        None => named.local.sym.as_ref(),
                    };
                    if imported_name == CLIENT_FACTORY {
                        return Some(named.local.sym.as_ref().to_string());
                    }
                }
                ImportSpecifier::Default(default) => {
                    if default.local.sym.as_ref() == CLIENT_FACTORY {
                        return Some(default.local.sym.as_ref().to_string());
                    }
                }
                ImportSpecifier::Namespace(_) => {}
            }
        }
    }

    None
}

/// Collects names of variables initialized with a direct factory call,
/// anywhere in the module body
fn collect_factory_declarations(module: &Module, factory: &str, out: &mut HashSet<String>) {
    for item in &module.body {
        let stmts: &[Stmt] = match item {
            ModuleItem::Stmt(stmt) => std::slice::from_ref(stmt),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export_decl)) => {
                if let Decl::Var(var_decl) = &export_decl.decl {
                    collect_from_var_decl(var_decl, factory, out);
                }
                continue;
            }
            _ => continue,
        };

        for stmt in stmts {
            if let Stmt::Decl(Decl::Var(var_decl)) = stmt {
                collect_from_var_decl(var_decl, factory, out);
            }
        }
    }
}

fn collect_from_var_decl(var_decl: &VarDecl, factory: &str, out: &mut HashSet<String>) {
    for declarator in &var_decl.decls {
        let Pat::Ident(name) = &declarator.name else {
            continue;
        };
        let Some(init) = &declarator.init else {
            continue;
        };
        if is_factory_call(init, factory) {
            out.insert(name.id.sym.as_ref().to_string());
        }
    }
}

/// `createClient(...)` or `createClient<paths>(...)`; type arguments are
/// irrelevant to binding detection
fn is_factory_call(expr: &Expr, factory: &str) -> bool {
    let Expr::Call(call) = expr else {
        return false;
    };
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    matches!(callee.as_ref(), Expr::Ident(ident) if ident.sym.as_ref() == factory)
}
