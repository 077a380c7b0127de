use crate::extract::extract_path_candidates;
use crate::parser::ParsedFile;
use crate::scope::ScopeIndex;
use ou_core::models::{CallSite, HttpMethod};
use std::collections::HashSet;
use swc_ecma_ast::*;
use tracing::trace;

/// A candidate usage observed at a call site, not yet matched against the
/// declared-endpoint set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedUsage {
    /// `"METHOD path-candidate"` key
    pub key: String,
    pub site: CallSite,
}

/// Walks the file's syntax tree and collects every
/// `<binding>.<METHOD>(<pathExpr>, ...)` call.
///
/// A call qualifies when the callee is a plain `identifier.property` access,
/// the identifier is one of the file's client bindings, the property is an
/// uppercase HTTP verb, and at least one argument is present. Each path
/// candidate the literal extractor produces for the first argument yields one
/// scanned usage; calls whose argument resolves to nothing contribute nothing.
pub fn scan_calls(
    file: &ParsedFile,
    relative_path: &str,
    bindings: &HashSet<String>,
) -> Vec<ScannedUsage> {
    let scope = ScopeIndex::build(&file.module);
    let mut scanner = Scanner {
        file,
        relative_path,
        bindings,
        scope,
        usages: Vec::new(),
    };

    for item in &file.module.body {
        scanner.walk_module_item(item);
    }

    scanner.usages
}

struct Scanner<'a> {
    file: &'a ParsedFile,
    relative_path: &'a str,
    bindings: &'a HashSet<String>,
    scope: ScopeIndex<'a>,
    usages: Vec<ScannedUsage>,
}

impl<'a> Scanner<'a> {
    fn walk_module_item(&mut self, item: &'a ModuleItem) {
        match item {
            ModuleItem::Stmt(stmt) => self.walk_stmt(stmt),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export_decl)) => {
                self.walk_decl(&export_decl.decl);
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(default_decl)) => {
                if let DefaultDecl::Fn(fn_expr) = &default_decl.decl {
                    self.walk_function(&fn_expr.function);
                }
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(default_expr)) => {
                self.walk_expr(&default_expr.expr);
            }
            _ => {}
        }
    }

    fn walk_decl(&mut self, decl: &'a Decl) {
        match decl {
            Decl::Var(var_decl) => {
                for declarator in &var_decl.decls {
                    if let Some(init) = &declarator.init {
                        self.walk_expr(init);
                    }
                }
            }
            Decl::Fn(fn_decl) => self.walk_function(&fn_decl.function),
            Decl::Class(class_decl) => self.walk_class(&class_decl.class),
            _ => {}
        }
    }

    fn walk_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::Expr(expr_stmt) => self.walk_expr(&expr_stmt.expr),
            Stmt::Return(ret_stmt) => {
                if let Some(arg) = &ret_stmt.arg {
                    self.walk_expr(arg);
                }
            }
            Stmt::Throw(throw_stmt) => self.walk_expr(&throw_stmt.arg),
            Stmt::If(if_stmt) => {
                self.walk_expr(&if_stmt.test);
                self.walk_stmt(&if_stmt.cons);
                if let Some(alt) = &if_stmt.alt {
                    self.walk_stmt(alt);
                }
            }
            Stmt::While(while_stmt) => {
                self.walk_expr(&while_stmt.test);
                self.walk_stmt(&while_stmt.body);
            }
            Stmt::DoWhile(do_while) => {
                self.walk_expr(&do_while.test);
                self.walk_stmt(&do_while.body);
            }
            Stmt::For(for_stmt) => {
                match &for_stmt.init {
                    Some(VarDeclOrExpr::VarDecl(var_decl)) => {
                        for declarator in &var_decl.decls {
                            if let Some(init) = &declarator.init {
                                self.walk_expr(init);
                            }
                        }
                    }
                    Some(VarDeclOrExpr::Expr(expr)) => self.walk_expr(expr),
                    None => {}
                }
                if let Some(test) = &for_stmt.test {
                    self.walk_expr(test);
                }
                if let Some(update) = &for_stmt.update {
                    self.walk_expr(update);
                }
                self.walk_stmt(&for_stmt.body);
            }
            Stmt::ForIn(for_in) => {
                self.walk_expr(&for_in.right);
                self.walk_stmt(&for_in.body);
            }
            Stmt::ForOf(for_of) => {
                self.walk_expr(&for_of.right);
                self.walk_stmt(&for_of.body);
            }
            Stmt::Block(block) => {
                for stmt in &block.stmts {
                    self.walk_stmt(stmt);
                }
            }
            Stmt::Try(try_stmt) => {
                for stmt in &try_stmt.block.stmts {
                    self.walk_stmt(stmt);
                }
                if let Some(handler) = &try_stmt.handler {
                    for stmt in &handler.body.stmts {
                        self.walk_stmt(stmt);
                    }
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    for stmt in &finalizer.stmts {
                        self.walk_stmt(stmt);
                    }
                }
            }
            Stmt::Switch(switch_stmt) => {
                self.walk_expr(&switch_stmt.discriminant);
                for case in &switch_stmt.cases {
                    if let Some(test) = &case.test {
                        self.walk_expr(test);
                    }
                    for stmt in &case.cons {
                        self.walk_stmt(stmt);
                    }
                }
            }
            Stmt::Labeled(labeled) => self.walk_stmt(&labeled.body),
            Stmt::Decl(decl) => self.walk_decl(decl),
            _ => {}
        }
    }

    fn walk_function(&mut self, function: &'a Function) {
        if let Some(body) = &function.body {
            for stmt in &body.stmts {
                self.walk_stmt(stmt);
            }
        }
    }

    fn walk_class(&mut self, class: &'a Class) {
        for member in &class.body {
            match member {
                ClassMember::Method(method) => self.walk_function(&method.function),
                ClassMember::PrivateMethod(method) => self.walk_function(&method.function),
                ClassMember::Constructor(ctor) => {
                    if let Some(body) = &ctor.body {
                        for stmt in &body.stmts {
                            self.walk_stmt(stmt);
                        }
                    }
                }
                ClassMember::ClassProp(prop) => {
                    if let Some(value) = &prop.value {
                        self.walk_expr(value);
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Call(call) => {
                self.record_client_call(call);

                if let Callee::Expr(callee) = &call.callee {
                    self.walk_expr(callee);
                }
                for arg in &call.args {
                    self.walk_expr(&arg.expr);
                }
            }
            Expr::New(new_expr) => {
                self.walk_expr(&new_expr.callee);
                if let Some(args) = &new_expr.args {
                    for arg in args {
                        self.walk_expr(&arg.expr);
                    }
                }
            }
            Expr::Member(member) => self.walk_expr(&member.obj),
            Expr::Bin(bin) => {
                self.walk_expr(&bin.left);
                self.walk_expr(&bin.right);
            }
            Expr::Unary(unary) => self.walk_expr(&unary.arg),
            Expr::Cond(cond) => {
                self.walk_expr(&cond.test);
                self.walk_expr(&cond.cons);
                self.walk_expr(&cond.alt);
            }
            Expr::Assign(assign) => self.walk_expr(&assign.right),
            Expr::Await(await_expr) => self.walk_expr(&await_expr.arg),
            Expr::Paren(paren) => self.walk_expr(&paren.expr),
            Expr::Arrow(arrow) => match arrow.body.as_ref() {
                BlockStmtOrExpr::BlockStmt(block) => {
                    for stmt in &block.stmts {
                        self.walk_stmt(stmt);
                    }
                }
                BlockStmtOrExpr::Expr(expr) => self.walk_expr(expr),
            },
            Expr::Fn(fn_expr) => self.walk_function(&fn_expr.function),
            Expr::Class(class_expr) => self.walk_class(&class_expr.class),
            Expr::Object(object) => {
                for prop in &object.props {
                    if let PropOrSpread::Prop(prop) = prop {
                        if let Prop::KeyValue(kv) = prop.as_ref() {
                            self.walk_expr(&kv.value);
                        }
                    }
                }
            }
            Expr::Array(array) => {
                for elem in array.elems.iter().flatten() {
                    self.walk_expr(&elem.expr);
                }
            }
            Expr::Seq(seq) => {
                for expr in &seq.exprs {
                    self.walk_expr(expr);
                }
            }
            Expr::Tpl(tpl) => {
                for expr in &tpl.exprs {
                    self.walk_expr(expr);
                }
            }
            Expr::TaggedTpl(tagged) => {
                self.walk_expr(&tagged.tag);
                for expr in &tagged.tpl.exprs {
                    self.walk_expr(expr);
                }
            }
            Expr::TsAs(as_expr) => self.walk_expr(&as_expr.expr),
            Expr::TsConstAssertion(assertion) => self.walk_expr(&assertion.expr),
            Expr::TsTypeAssertion(assertion) => self.walk_expr(&assertion.expr),
            Expr::TsNonNull(non_null) => self.walk_expr(&non_null.expr),
            Expr::OptChain(opt_chain) => match opt_chain.base.as_ref() {
                OptChainBase::Member(member) => self.walk_expr(&member.obj),
                OptChainBase::Call(call) => {
                    self.walk_expr(&call.callee);
                    for arg in &call.args {
                        self.walk_expr(&arg.expr);
                    }
                }
            },
            Expr::JSXElement(element) => self.walk_jsx_element(element),
            Expr::JSXFragment(fragment) => {
                for child in &fragment.children {
                    self.walk_jsx_child(child);
                }
            }
            _ => {}
        }
    }

    fn walk_jsx_element(&mut self, element: &'a JSXElement) {
        for attr in &element.opening.attrs {
            if let JSXAttrOrSpread::JSXAttr(attr) = attr {
                if let Some(JSXAttrValue::JSXExprContainer(container)) = &attr.value {
                    if let JSXExpr::Expr(expr) = &container.expr {
                        self.walk_expr(expr);
                    }
                }
            }
        }
        for child in &element.children {
            self.walk_jsx_child(child);
        }
    }

    fn walk_jsx_child(&mut self, child: &'a JSXElementChild) {
        match child {
            JSXElementChild::JSXExprContainer(container) => {
                if let JSXExpr::Expr(expr) = &container.expr {
                    self.walk_expr(expr);
                }
            }
            JSXElementChild::JSXElement(element) => self.walk_jsx_element(element),
            JSXElementChild::JSXFragment(fragment) => {
                for child in &fragment.children {
                    self.walk_jsx_child(child);
                }
            }
            _ => {}
        }
    }

    fn record_client_call(&mut self, call: &'a CallExpr) {
        let Some((method, path_expr)) = self.match_client_call(call) else {
            return;
        };

        let line = self.file.line_at(call.span.lo.0);
        let candidates = extract_path_candidates(path_expr, &self.scope);
        trace!(
            file = %self.relative_path,
            line,
            method = %method,
            candidates = candidates.len(),
            "Scanned client call"
        );

        for candidate in candidates {
            // Unresolvable expressions yield zero candidates rather than a
            // sentinel; an empty string never names an endpoint.
            if candidate.is_empty() {
                continue;
            }
            self.usages.push(ScannedUsage {
                key: format!("{} {}", method, candidate),
                site: CallSite::new(self.relative_path, line),
            });
        }
    }

    /// `<binding>.<VERB>(firstArg, ...)`; zero-argument and spread-argument
    /// calls do not qualify
    fn match_client_call(&self, call: &'a CallExpr) -> Option<(HttpMethod, &'a Expr)> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let Expr::Member(member) = callee.as_ref() else {
            return None;
        };
        let Expr::Ident(object) = member.obj.as_ref() else {
            return None;
        };
        if !self.bindings.contains(object.sym.as_ref()) {
            return None;
        }
        let MemberProp::Ident(prop) = &member.prop else {
            return None;
        };
        let method = HttpMethod::from_call_name(prop.sym.as_ref())?;

        let first = call.args.first()?;
        if first.spread.is_some() {
            return None;
        }
        Some((method, &first.expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::client_bindings;
    use crate::parser::SourceParser;
    use std::path::Path;

    fn scan(source: &str) -> Vec<ScannedUsage> {
        let parsed = SourceParser::new()
            .parse_source(source, Path::new("src/test.ts"))
            .unwrap();
        let bindings = client_bindings(&parsed.module);
        scan_calls(&parsed, "src/test.ts", &bindings)
    }

    #[test]
    fn records_client_calls_with_line_numbers() {
        let usages = scan("const client = createClient();\nclient.GET(\"/users\");\nclient.POST(\"/users\");\n");
        assert_eq!(usages.len(), 2);
        assert_eq!(usages[0].key, "GET /users");
        assert_eq!(usages[0].site, CallSite::new("src/test.ts", 2));
        assert_eq!(usages[1].key, "POST /users");
        assert_eq!(usages[1].site, CallSite::new("src/test.ts", 3));
    }

    #[test]
    fn ignores_non_client_identifiers() {
        let usages = scan(r#"axios.GET("/users");"#);
        assert!(usages.is_empty());
    }

    #[test]
    fn ignores_lowercase_method_names() {
        let usages = scan(r#"client.get("/users");"#);
        assert!(usages.is_empty());
    }

    #[test]
    fn skips_zero_argument_calls() {
        let usages = scan("client.GET();");
        assert!(usages.is_empty());
    }

    #[test]
    fn unresolvable_argument_records_nothing() {
        let usages = scan("client.GET(buildPath());");
        assert!(usages.is_empty());
    }

    #[test]
    fn ternary_argument_records_both_candidates() {
        let usages = scan(r#"client.GET(isAdmin ? "/admin/users" : "/users");"#);
        let keys: Vec<_> = usages.iter().map(|u| u.key.as_str()).collect();
        assert_eq!(keys, vec!["GET /admin/users", "GET /users"]);
    }

    #[test]
    fn finds_calls_inside_functions_and_classes() {
        let source = r#"
            export async function listUsers() {
                return client.GET("/users");
            }
            class Api {
                remove(id: string) {
                    return client.DELETE(`/users/${id}`);
                }
            }
        "#;
        let keys: Vec<_> = scan(source).into_iter().map(|u| u.key).collect();
        assert_eq!(keys, vec!["GET /users", "DELETE /users/{id}"]);
    }

    #[test]
    fn finds_calls_inside_jsx_attributes() {
        let source = r#"
            export function Button() {
                return <button onClick={() => client.POST("/users")}>add</button>;
            }
        "#;
        let parsed = SourceParser::new()
            .parse_source(source, Path::new("src/Button.tsx"))
            .unwrap();
        let bindings = client_bindings(&parsed.module);
        let usages = scan_calls(&parsed, "src/Button.tsx", &bindings);
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].key, "POST /users");
    }

    #[test]
    fn custom_binding_from_factory_import() {
        let source = r#"
            import { createClient } from "openapi-fetch";
            const api = createClient<paths>();
            api.GET("/users");
            client.GET("/posts");
        "#;
        let keys: Vec<_> = scan(source).into_iter().map(|u| u.key).collect();
        assert_eq!(keys, vec!["GET /users"]);
    }
}
