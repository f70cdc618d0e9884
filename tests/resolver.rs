#[cfg(test)]
mod resolver_tests {
    use rulox as lox;

    use lox::ast::Stmt;
    use lox::parser::Parser;
    use lox::resolver::{Resolutions, Resolver};
    use lox::scanner::scan_tokens;

    fn parse(source: &str) -> Vec<Stmt> {
        let (tokens, errors) = scan_tokens(source);
        assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);

        Parser::new(tokens)
            .parse()
            .unwrap_or_else(|errors| panic!("parse failed: {:?}", errors))
    }

    fn resolve(source: &str) -> Resolutions {
        Resolver::new()
            .resolve(&parse(source))
            .unwrap_or_else(|errors| panic!("resolve failed: {:?}", errors))
    }

    fn resolve_errors(source: &str) -> Vec<String> {
        match Resolver::new().resolve(&parse(source)) {
            Ok(resolutions) => panic!("expected errors, resolved {:?}", resolutions),
            Err(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_globals_are_left_out() {
        let resolutions = resolve("переменная а = 1; вывести а; а = 2;");

        assert!(resolutions.is_empty());
    }

    #[test]
    fn test_block_local_distance() {
        // ids: #0 is `а` inside the inner block
        let resolutions = resolve("{ переменная а = 1; { вывести а; } }");

        assert_eq!(resolutions.get(&0), Some(&1));
    }

    #[test]
    fn test_closure_distance() {
        // #0 `x` read inside `g`; #1 `x` assigned inside `g`
        let resolutions =
            resolve("функция f() { переменная x = 1; функция g() { вывести x; x = 2; } }");

        assert_eq!(resolutions.get(&0), Some(&1));
        assert_eq!(resolutions.get(&1), Some(&1));
    }

    #[test]
    fn test_parameters_are_locals() {
        let resolutions = resolve("функция f(а) { вернуть а; }");

        assert_eq!(resolutions.get(&0), Some(&0));
    }

    #[test]
    fn test_redeclaration_in_same_scope_is_allowed() {
        let resolutions = resolve("{ переменная а = 1; переменная а = 2; вывести а; }");

        assert_eq!(resolutions.get(&0), Some(&0));
    }

    #[test]
    fn test_this_and_super_distances() {
        // #0 superclass `А` (global), #1 `супер`, #2 `это`
        let resolutions = resolve("класс Б < А { м() { супер.м(); вернуть это; } }");

        assert_eq!(resolutions.get(&0), None);
        assert_eq!(resolutions.get(&1), Some(&2));
        assert_eq!(resolutions.get(&2), Some(&1));
    }

    #[test]
    fn test_own_initializer_read() {
        let errors = resolve_errors("{ переменная а = а; }");

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'а': Can't read local variable in its own initializer."
                .to_string()]
        );
    }

    #[test]
    fn test_global_self_reference_is_not_static_error() {
        resolve("переменная а = а;");
    }

    #[test]
    fn test_top_level_return() {
        let errors = resolve_errors("вернуть 1;");

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'вернуть': Can't return from top-level code.".to_string()]
        );
    }

    #[test]
    fn test_this_outside_class() {
        let errors = resolve_errors("функция f() { вернуть это; }");

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'это': Can't use 'это' outside of a class.".to_string()]
        );
    }

    #[test]
    fn test_super_misuse() {
        let errors = resolve_errors("вывести супер.м;\nкласс А { м() { супер.м(); } }");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at 'супер': Can't use 'супер' outside of a class.".to_string(),
                "[line 2] Error at 'супер': Can't use 'супер' in a class with no superclass."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_class_inheriting_from_itself() {
        let errors = resolve_errors("класс А < А {}");

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'А': A class can't inherit from itself.".to_string()]
        );
    }

    #[test]
    fn test_every_error_is_reported() {
        let errors = resolve_errors("вернуть 1;\n{ переменная б = б; }\nвывести это;");

        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("[line 1]"));
        assert!(errors[1].starts_with("[line 2]"));
        assert!(errors[2].starts_with("[line 3]"));
    }
}
