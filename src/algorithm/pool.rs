use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::StudentCourse;

/// Cursos completados que aún no reclamó ningún grupo anterior en la
/// evaluación de un major, con sus créditos.
///
/// Cada evaluación tiene su propio pool; pasa de un grupo al siguiente por
/// valor (`consume`), nunca se comparte.
#[derive(Debug, Clone, Default)]
pub struct AvailablePool {
    remaining: HashSet<String>,
    credits: HashMap<String, f64>,
}

impl AvailablePool {
    /// Pool inicial con los cursos completados. Si un curso aparece varias
    /// veces, prevalecen los créditos de la última fila.
    pub fn from_courses(courses: &[StudentCourse]) -> Self {
        let mut pool = AvailablePool::default();
        for c in courses.iter().filter(|c| c.completed) {
            pool.remaining.insert(c.course_id.clone());
            pool.credits.insert(c.course_id.clone(), c.credits);
        }
        pool
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.remaining.contains(course_id)
    }

    /// Créditos conocidos del curso (0 si no se conocen)
    pub fn credits_of(&self, course_id: &str) -> f64 {
        self.credits.get(course_id).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Quita del pool los cursos usados por un grupo y lo devuelve.
    pub fn consume(mut self, used: &BTreeSet<String>) -> Self {
        for id in used {
            self.remaining.remove(id);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, credits: f64, completed: bool) -> StudentCourse {
        StudentCourse { course_id: id.to_string(), credits, completed }
    }

    #[test]
    fn solo_completados() {
        let pool = AvailablePool::from_courses(&[course("A", 3.0, true), course("B", 4.0, false)]);
        assert!(pool.contains("A"));
        assert!(!pool.contains("B"));
        assert_eq!(pool.credits_of("B"), 0.0);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn consume_quita_usados() {
        let pool = AvailablePool::from_courses(&[course("A", 3.0, true), course("B", 4.0, true)]);
        let used: BTreeSet<String> = ["A".to_string()].into_iter().collect();
        let pool = pool.consume(&used);
        assert!(!pool.contains("A"));
        assert!(pool.contains("B"));
        // los créditos siguen disponibles para consulta
        assert_eq!(pool.credits_of("A"), 3.0);
    }

    #[test]
    fn ultima_fila_gana() {
        let pool = AvailablePool::from_courses(&[course("A", 3.0, true), course("A", 4.0, true)]);
        assert_eq!(pool.credits_of("A"), 4.0);
    }
}
