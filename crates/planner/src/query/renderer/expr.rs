use crate::query::{
    ast::expr::{BinaryOp, BinaryOperator, DateField, Expr, FunctionCall, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::Constant(val) => {
                let literal = r.dialect.render_literal(val);
                r.sql.push_str(&literal);
            }
            Expr::BinaryOp(op) => op.render(r),
            Expr::Not(inner) => {
                r.sql.push_str("NOT (");
                inner.render(r);
                r.sql.push(')');
            }
            Expr::IsNull(inner) => {
                r.sql.push('(');
                inner.render(r);
                r.sql.push_str(" IS NULL)");
            }
            Expr::IsNotNull(inner) => {
                r.sql.push('(');
                inner.render(r);
                r.sql.push_str(" IS NOT NULL)");
            }
            Expr::Like {
                expr,
                pattern,
                escape,
            } => {
                r.sql.push('(');
                expr.render(r);
                r.sql.push_str(" LIKE ");
                pattern.render(r);
                if let Some(c) = escape {
                    let literal = r
                        .dialect
                        .render_literal(&model::core::value::Value::String(c.to_string()));
                    r.sql.push_str(" ESCAPE ");
                    r.sql.push_str(&literal);
                }
                r.sql.push(')');
            }
            Expr::FunctionCall(func) => func.render(r),
            Expr::Position { needle, haystack } => {
                r.sql.push_str("POSITION(");
                needle.render(r);
                r.sql.push_str(" IN ");
                haystack.render(r);
                r.sql.push(')');
            }
            Expr::Extract { field, expr } => {
                let field_str = match field {
                    DateField::Year => "YEAR",
                    DateField::Month => "MONTH",
                    DateField::Day => "DAY",
                    DateField::Hour => "HOUR",
                    DateField::Minute => "MINUTE",
                    DateField::Second => "SECOND",
                };
                r.sql.push_str("EXTRACT(");
                r.sql.push_str(field_str);
                r.sql.push_str(" FROM ");
                expr.render(r);
                r.sql.push(')');
            }
            Expr::Cast { expr, data_type } => {
                r.sql.push_str("CAST(");
                expr.render(r);
                r.sql.push_str(" AS ");
                let type_name = r.dialect.render_data_type(data_type, None);
                r.sql.push_str(&type_name);
                r.sql.push(')');
            }
            Expr::CurrentTimestamp => r.sql.push_str("CURRENT_TIMESTAMP"),
            Expr::Exists(select) => {
                r.sql.push_str("EXISTS (");
                select.render(r);
                r.sql.push(')');
            }
            Expr::Subquery(select) => {
                r.sql.push('(');
                select.render(r);
                r.sql.push(')');
            }
            Expr::Wildcard { qualifier } => {
                if let Some(qualifier) = qualifier {
                    r.push_identifier(qualifier);
                    r.sql.push('.');
                }
                r.sql.push('*');
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.push_identifier(qualifier);
            r.sql.push('.');
        }
        r.push_identifier(&self.name);
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        r.sql.push('(');
        self.left.render(r);

        let op_str = match self.op {
            BinaryOperator::Eq => " = ",
            BinaryOperator::NotEq => " <> ",
            BinaryOperator::Lt => " < ",
            BinaryOperator::LtEq => " <= ",
            BinaryOperator::Gt => " > ",
            BinaryOperator::GtEq => " >= ",
            BinaryOperator::And => " AND ",
            BinaryOperator::Or => " OR ",
            BinaryOperator::Add => " + ",
            BinaryOperator::Sub => " - ",
            BinaryOperator::Mul => " * ",
            BinaryOperator::Div => " / ",
            BinaryOperator::Mod => " % ",
        };
        r.sql.push_str(op_str);

        self.right.render(r);
        r.sql.push(')');
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.name);
        r.sql.push('(');
        if self.wildcard {
            r.sql.push('*');
        } else {
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                arg.render(r);
            }
        }
        r.sql.push(')');
    }
}
