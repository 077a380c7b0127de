use std::collections::HashMap;
use swc_ecma_ast::*;

/// File-wide index from identifier name to the initializer expressions bound
/// to it.
///
/// This is what lets the literal extractor resolve a bare identifier back to
/// `const endpoint = "/users"` or a parameter default like
/// `function f(path = "/users")`. Resolution is purely syntactic: the index
/// records every declaration in the file regardless of lexical scope, in
/// source order, and never follows imports.
pub struct ScopeIndex<'a> {
    decls: HashMap<String, Vec<&'a Expr>>,
}

impl<'a> ScopeIndex<'a> {
    /// Builds the index by walking every statement of the module
    pub fn build(module: &'a Module) -> Self {
        let mut index = Self {
            decls: HashMap::new(),
        };
        for item in &module.body {
            index.collect_module_item(item);
        }
        index
    }

    /// Initializers declared for a name, in source order
    pub fn initializers(&self, name: &str) -> &[&'a Expr] {
        self.decls.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn record(&mut self, name: &str, init: &'a Expr) {
        self.decls.entry(name.to_string()).or_default().push(init);
    }

    fn collect_module_item(&mut self, item: &'a ModuleItem) {
        match item {
            ModuleItem::Stmt(stmt) => self.collect_stmt(stmt),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export_decl)) => {
                self.collect_decl(&export_decl.decl);
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(default_decl)) => {
                if let DefaultDecl::Fn(fn_expr) = &default_decl.decl {
                    self.collect_function(&fn_expr.function);
                }
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(default_expr)) => {
                self.collect_expr(&default_expr.expr);
            }
            _ => {}
        }
    }

    fn collect_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::Decl(decl) => self.collect_decl(decl),
            Stmt::Block(block) => {
                for stmt in &block.stmts {
                    self.collect_stmt(stmt);
                }
            }
            Stmt::If(if_stmt) => {
                self.collect_stmt(&if_stmt.cons);
                if let Some(alt) = &if_stmt.alt {
                    self.collect_stmt(alt);
                }
            }
            Stmt::While(while_stmt) => self.collect_stmt(&while_stmt.body),
            Stmt::DoWhile(do_while) => self.collect_stmt(&do_while.body),
            Stmt::For(for_stmt) => {
                if let Some(VarDeclOrExpr::VarDecl(var_decl)) = &for_stmt.init {
                    self.collect_var_decl(var_decl);
                }
                self.collect_stmt(&for_stmt.body);
            }
            Stmt::ForIn(for_in) => self.collect_stmt(&for_in.body),
            Stmt::ForOf(for_of) => self.collect_stmt(&for_of.body),
            Stmt::Try(try_stmt) => {
                for stmt in &try_stmt.block.stmts {
                    self.collect_stmt(stmt);
                }
                if let Some(handler) = &try_stmt.handler {
                    for stmt in &handler.body.stmts {
                        self.collect_stmt(stmt);
                    }
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    for stmt in &finalizer.stmts {
                        self.collect_stmt(stmt);
                    }
                }
            }
            Stmt::Switch(switch_stmt) => {
                for case in &switch_stmt.cases {
                    for stmt in &case.cons {
                        self.collect_stmt(stmt);
                    }
                }
            }
            Stmt::Labeled(labeled) => self.collect_stmt(&labeled.body),
            Stmt::Return(ret_stmt) => {
                if let Some(arg) = &ret_stmt.arg {
                    self.collect_expr(arg);
                }
            }
            Stmt::Expr(expr_stmt) => self.collect_expr(&expr_stmt.expr),
            _ => {}
        }
    }

    fn collect_decl(&mut self, decl: &'a Decl) {
        match decl {
            Decl::Var(var_decl) => self.collect_var_decl(var_decl),
            Decl::Fn(fn_decl) => self.collect_function(&fn_decl.function),
            Decl::Class(class_decl) => self.collect_class(&class_decl.class),
            _ => {}
        }
    }

    fn collect_var_decl(&mut self, var_decl: &'a VarDecl) {
        for declarator in &var_decl.decls {
            if let Some(init) = &declarator.init {
                if let Pat::Ident(ident) = &declarator.name {
                    self.record(ident.id.sym.as_ref(), init);
                }
                self.collect_expr(init);
            }
        }
    }

    fn collect_function(&mut self, function: &'a Function) {
        for param in &function.params {
            self.collect_param_pat(&param.pat);
        }
        if let Some(body) = &function.body {
            for stmt in &body.stmts {
                self.collect_stmt(stmt);
            }
        }
    }

    fn collect_class(&mut self, class: &'a Class) {
        for member in &class.body {
            match member {
                ClassMember::Method(method) => self.collect_function(&method.function),
                ClassMember::PrivateMethod(method) => self.collect_function(&method.function),
                ClassMember::Constructor(ctor) => {
                    for param in &ctor.params {
                        if let ParamOrTsParamProp::Param(param) = param {
                            self.collect_param_pat(&param.pat);
                        }
                    }
                    if let Some(body) = &ctor.body {
                        for stmt in &body.stmts {
                            self.collect_stmt(stmt);
                        }
                    }
                }
                ClassMember::ClassProp(prop) => {
                    if let Some(value) = &prop.value {
                        self.collect_expr(value);
                    }
                }
                _ => {}
            }
        }
    }

    /// Parameter defaults (`path = "/users"`) count as declarations too
    fn collect_param_pat(&mut self, pat: &'a Pat) {
        if let Pat::Assign(assign) = pat {
            if let Pat::Ident(ident) = assign.left.as_ref() {
                self.record(ident.id.sym.as_ref(), &assign.right);
            }
            self.collect_expr(&assign.right);
        }
    }

    fn collect_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Arrow(arrow) => {
                for pat in &arrow.params {
                    self.collect_param_pat(pat);
                }
                match arrow.body.as_ref() {
                    BlockStmtOrExpr::BlockStmt(block) => {
                        for stmt in &block.stmts {
                            self.collect_stmt(stmt);
                        }
                    }
                    BlockStmtOrExpr::Expr(expr) => self.collect_expr(expr),
                }
            }
            Expr::Fn(fn_expr) => self.collect_function(&fn_expr.function),
            Expr::Class(class_expr) => self.collect_class(&class_expr.class),
            Expr::Call(call) => {
                for arg in &call.args {
                    self.collect_expr(&arg.expr);
                }
            }
            Expr::New(new_expr) => {
                if let Some(args) = &new_expr.args {
                    for arg in args {
                        self.collect_expr(&arg.expr);
                    }
                }
            }
            Expr::Paren(paren) => self.collect_expr(&paren.expr),
            Expr::Cond(cond) => {
                self.collect_expr(&cond.cons);
                self.collect_expr(&cond.alt);
            }
            Expr::Bin(bin) => {
                self.collect_expr(&bin.left);
                self.collect_expr(&bin.right);
            }
            Expr::Assign(assign) => self.collect_expr(&assign.right),
            Expr::Await(await_expr) => self.collect_expr(&await_expr.arg),
            Expr::Object(object) => {
                for prop in &object.props {
                    if let PropOrSpread::Prop(prop) = prop {
                        if let Prop::KeyValue(kv) = prop.as_ref() {
                            self.collect_expr(&kv.value);
                        }
                    }
                }
            }
            Expr::Array(array) => {
                for elem in array.elems.iter().flatten() {
                    self.collect_expr(&elem.expr);
                }
            }
            Expr::Seq(seq) => {
                for expr in &seq.exprs {
                    self.collect_expr(expr);
                }
            }
            Expr::TsAs(as_expr) => self.collect_expr(&as_expr.expr),
            Expr::TsConstAssertion(assertion) => self.collect_expr(&assertion.expr),
            _ => {}
        }
    }
}
