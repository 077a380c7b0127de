use crate::scope::ScopeIndex;
use swc_ecma_ast::*;

/// Depth guard for identifier resolution. Declarations resolve through their
/// own initializers only, so the only way to exceed this is a cyclic
/// declaration chain (`const a = b; const b = a;`), which yields zero
/// candidates instead of recursing forever.
const MAX_RESOLVE_DEPTH: usize = 32;

/// One extraction rule: returns `None` when the node shape is not its
/// business, `Some(candidates)` when it resolved the node. Rules are disjoint
/// over node kinds, so the list order carries no precedence decisions.
type ExtractRule = fn(&Expr, &ScopeIndex<'_>, usize) -> Option<Vec<String>>;

const RULES: &[ExtractRule] = &[
    rule_string_literal,
    rule_plain_template,
    rule_template_with_substitutions,
    rule_conditional,
    rule_identifier,
    rule_parenthesized,
    rule_type_assertion,
];

/// Statically resolves the set of string values an expression can produce.
///
/// Pure function of the syntax tree: no execution, no imports, no runtime
/// state. Unresolvable shapes (function calls, member access, concatenation
/// with unknown operands) yield zero candidates. Candidate order is
/// deterministic: branch and declaration order as encountered.
pub fn extract_path_candidates(expr: &Expr, scope: &ScopeIndex<'_>) -> Vec<String> {
    extract_with_depth(expr, scope, 0)
}

fn extract_with_depth(expr: &Expr, scope: &ScopeIndex<'_>, depth: usize) -> Vec<String> {
    if depth > MAX_RESOLVE_DEPTH {
        return Vec::new();
    }

    for rule in RULES {
        if let Some(candidates) = rule(expr, scope, depth) {
            return candidates;
        }
    }

    Vec::new()
}

/// `"/users"` -> one candidate
fn rule_string_literal(expr: &Expr, _scope: &ScopeIndex<'_>, _depth: usize) -> Option<Vec<String>> {
    match expr {
        Expr::Lit(Lit::Str(s)) => Some(vec![s.value.as_str().unwrap_or("").to_string()]),
        _ => None,
    }
}

/// `` `/users` `` (no interpolation) -> one candidate
fn rule_plain_template(expr: &Expr, _scope: &ScopeIndex<'_>, _depth: usize) -> Option<Vec<String>> {
    match expr {
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            let text = tpl.quasis.first().map(quasi_text).unwrap_or_default();
            Some(vec![text])
        }
        _ => None,
    }
}

/// `` `/users/${id}` `` -> one candidate pattern `/users/{id}`.
///
/// Each interpolated sub-expression becomes a placeholder named after the
/// identifier when it is one, `{param}` otherwise; quasi text between
/// interpolations is preserved verbatim.
fn rule_template_with_substitutions(
    expr: &Expr,
    _scope: &ScopeIndex<'_>,
    _depth: usize,
) -> Option<Vec<String>> {
    let Expr::Tpl(tpl) = expr else {
        return None;
    };
    if tpl.exprs.is_empty() {
        return None;
    }

    let mut pattern = String::new();
    for (i, quasi) in tpl.quasis.iter().enumerate() {
        pattern.push_str(&quasi_text(quasi));
        if let Some(sub) = tpl.exprs.get(i) {
            let name = match sub.as_ref() {
                Expr::Ident(ident) => ident.sym.as_ref(),
                _ => "param",
            };
            pattern.push('{');
            pattern.push_str(name);
            pattern.push('}');
        }
    }

    Some(vec![pattern])
}

/// `cond ? a : b` -> candidates of `a` followed by candidates of `b`
fn rule_conditional(expr: &Expr, scope: &ScopeIndex<'_>, depth: usize) -> Option<Vec<String>> {
    let Expr::Cond(cond) = expr else {
        return None;
    };

    let mut candidates = extract_with_depth(&cond.cons, scope, depth + 1);
    candidates.extend(extract_with_depth(&cond.alt, scope, depth + 1));
    Some(candidates)
}

/// Bare identifier -> recurse into every same-file declaration initializer
fn rule_identifier(expr: &Expr, scope: &ScopeIndex<'_>, depth: usize) -> Option<Vec<String>> {
    let Expr::Ident(ident) = expr else {
        return None;
    };

    let mut candidates = Vec::new();
    for init in scope.initializers(ident.sym.as_ref()) {
        candidates.extend(extract_with_depth(init, scope, depth + 1));
    }
    Some(candidates)
}

/// `(expr)` -> recurse inner
fn rule_parenthesized(expr: &Expr, scope: &ScopeIndex<'_>, depth: usize) -> Option<Vec<String>> {
    match expr {
        Expr::Paren(paren) => Some(extract_with_depth(&paren.expr, scope, depth + 1)),
        _ => None,
    }
}

/// `expr as T`, `expr as const`, `<T>expr` -> recurse, ignoring the type
fn rule_type_assertion(expr: &Expr, scope: &ScopeIndex<'_>, depth: usize) -> Option<Vec<String>> {
    match expr {
        Expr::TsAs(as_expr) => Some(extract_with_depth(&as_expr.expr, scope, depth + 1)),
        Expr::TsConstAssertion(assertion) => {
            Some(extract_with_depth(&assertion.expr, scope, depth + 1))
        }
        Expr::TsTypeAssertion(assertion) => {
            Some(extract_with_depth(&assertion.expr, scope, depth + 1))
        }
        _ => None,
    }
}

fn quasi_text(quasi: &TplElement) -> String {
    quasi
        .cooked
        .as_ref()
        .and_then(|cooked| cooked.as_str().map(str::to_string))
        .unwrap_or_else(|| quasi.raw.as_ref().to_string())
}
