#[cfg(test)]
mod parser_tests {
    use rulox as lox;

    use lox::ast::{Expr, Stmt};
    use lox::ast_printer::AstPrinter;
    use lox::parser::Parser;
    use lox::scanner::scan_tokens;
    use lox::LoxError;

    fn parser_for(source: &str) -> Parser {
        let (tokens, errors) = scan_tokens(source);
        assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);

        Parser::new(tokens)
    }

    fn print_expr(source: &str) -> String {
        let expr = parser_for(source)
            .parse_expression()
            .unwrap_or_else(|errors| panic!("parse failed: {:?}", errors));

        AstPrinter::print(&expr)
    }

    fn program(source: &str) -> Vec<Stmt> {
        parser_for(source)
            .parse()
            .unwrap_or_else(|errors| panic!("parse failed: {:?}", errors))
    }

    fn program_errors(source: &str) -> Vec<String> {
        match parser_for(source).parse() {
            Ok(statements) => panic!("expected errors, parsed {:?}", statements),
            Err(errors) => errors.iter().map(LoxError::to_string).collect(),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(print_expr("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(print_expr("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
        assert_eq!(print_expr("1 < 2 == правда"), "(== (< 1.0 2.0) true)");
    }

    #[test]
    fn test_grouping_and_unary() {
        assert_eq!(print_expr("-(1 - 2)"), "(- (group (- 1.0 2.0)))");
        assert_eq!(print_expr("!!ложь"), "(! (! false))");
        assert_eq!(print_expr("\"строка\""), "строка");
        assert_eq!(print_expr("пусто"), "nil");
        assert_eq!(print_expr("2.5"), "2.5");
    }

    #[test]
    fn test_logical_operators() {
        assert_eq!(print_expr("а или б и в"), "(или а (и б в))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(print_expr("а = б = 3"), "(= а (= б 3.0))");
        assert_eq!(print_expr("объект.поле = 1"), "(= (. объект поле) 1.0)");
    }

    #[test]
    fn test_calls_and_properties() {
        assert_eq!(
            print_expr("объект.метод(1)(2, 3)"),
            "(call (call (. объект метод) 1.0) 2.0 3.0)"
        );
        assert_eq!(print_expr("супер.метод"), "(. супер метод)");
        assert_eq!(print_expr("это.x"), "(. это x)");
    }

    #[test]
    fn test_invalid_assignment_target() {
        let errors = parser_for("1 = 2").parse_expression().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at '=': Invalid assignment target."
        );
    }

    #[test]
    fn test_error_at_end() {
        let errors = program_errors("вывести 1");

        assert_eq!(
            errors,
            vec!["[line 1] Error at end: Expected ';' after value.".to_string()]
        );
    }

    #[test]
    fn test_resynchronizes_after_error() {
        let errors = program_errors("переменная = 1;\nвывести 2;\nвывести ;\nвывести 3;");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at '=': Expected variable name.".to_string(),
                "[line 3] Error at ';': Expected expression.".to_string(),
            ]
        );
    }

    #[test]
    fn test_too_many_arguments_is_not_fatal() {
        let args = vec!["0"; 256].join(", ");
        let errors = program_errors(&format!("ф({});", args));

        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("Can't have more than 255 arguments."));
    }

    #[test]
    fn test_too_many_parameters_is_not_fatal() {
        let params: Vec<String> = (0..256).map(|i| format!("п{}", i)).collect();
        let errors = program_errors(&format!("функция ф({}) {{}}", params.join(", ")));

        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("Can't have more than 255 parameters."));
    }

    #[test]
    fn test_for_is_desugared_to_while() {
        let statements = program("для (переменная i = 0; i < 3; i = i + 1) вывести i;");

        assert_eq!(statements.len(), 1);

        let Stmt::Block(outer) = &statements[0] else {
            panic!("expected block, got {:?}", statements[0]);
        };
        assert!(matches!(outer[0], Stmt::Var { .. }));

        let Stmt::While { body, .. } = &outer[1] else {
            panic!("expected while, got {:?}", outer[1]);
        };
        let Stmt::Block(inner) = body.as_ref() else {
            panic!("expected block body, got {:?}", body);
        };
        assert!(matches!(inner[0], Stmt::Print(_)));
        assert!(matches!(inner[1], Stmt::Expression(Expr::Assign { .. })));
    }

    #[test]
    fn test_empty_for_clauses_loop_forever() {
        let statements = program("для (;;) вывести 1;");

        let Stmt::While { condition, .. } = &statements[0] else {
            panic!("expected while, got {:?}", statements[0]);
        };
        assert_eq!(AstPrinter::print(condition), "true");
    }

    #[test]
    fn test_if_without_else() {
        let statements = program("если (x) вывести 1;");

        assert!(matches!(
            statements[0],
            Stmt::If {
                else_branch: None,
                ..
            }
        ));
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        let statements = program("если (а) если (б) вывести 1; иначе вывести 2;");

        let Stmt::If {
            then_branch,
            else_branch,
            ..
        } = &statements[0]
        else {
            panic!("expected if, got {:?}", statements[0]);
        };

        assert!(else_branch.is_none());
        assert!(matches!(
            then_branch.as_ref(),
            Stmt::If {
                else_branch: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_class_with_superclass() {
        let statements = program("класс Б < А { init(x) {} метод() { вернуть 1; } }");

        let Stmt::Class {
            name,
            superclass,
            methods,
        } = &statements[0]
        else {
            panic!("expected class, got {:?}", statements[0]);
        };

        assert_eq!(name.lexeme, "Б");
        assert!(matches!(superclass, Some(Expr::Variable { name, .. }) if name.lexeme == "А"));
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].params.len(), 1);
        assert_eq!(methods[1].name.lexeme, "метод");
    }

    #[test]
    fn test_super_requires_method_name() {
        let errors = program_errors("вывести супер;");

        assert_eq!(
            errors,
            vec!["[line 1] Error at ';': Expected '.' after 'супер'.".to_string()]
        );
    }

    #[test]
    fn test_ids_continue_from_first_id() {
        let mut parser = parser_for("а; а = 1; это;").with_first_id(10);
        let statements = parser.parse().unwrap();

        let ids: Vec<usize> = statements
            .iter()
            .map(|stmt| match stmt {
                Stmt::Expression(Expr::Variable { id, .. })
                | Stmt::Expression(Expr::This { id, .. }) => *id,
                Stmt::Expression(Expr::Assign { id, .. }) => *id,
                other => panic!("unexpected statement {:?}", other),
            })
            .collect();

        assert_eq!(ids, vec![10, 11, 12]);
        assert_eq!(parser.next_id(), 13);
    }

    #[test]
    fn test_nesting_limit_for_unary_operands() {
        let errors = program_errors(&format!("вывести {}1;", "-".repeat(300)));

        assert_eq!(
            errors,
            vec!["[line 1] Error at '-': Too much nesting.".to_string()]
        );
    }

    #[test]
    fn test_nesting_limit_for_blocks() {
        let errors = program_errors(&format!("{}{}", "{".repeat(300), "}".repeat(300)));

        assert_eq!(errors[0], "[line 1] Error at '{': Too much nesting.");
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));

        assert!(print_expr(&source).starts_with("(group (group"));
    }
}
