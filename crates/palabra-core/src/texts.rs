//! The fixed Spanish reply texts.

/// Body command that returns the briefing.
pub const CMD_BRIEFING: &str = "instrucciones";

/// Body command that returns the aggregated statistics.
pub const CMD_RESULTS: &str = "resultados";

pub const BRIEFING: &str = "\
Adivina la palabra oculta en seis intentos.
Cada intento debe ser una palabra válida de *5 letras*.
Después de cada intento unos indicadores de color (⬜🟨🟩) debajo de cada letra cambia para mostrar qué tan cerca estás de acertar la palabra.

Ejemplos:
G   A   T   O   S
🟩⬜⬜⬜⬜
La letra G🟩 está en la palabra y en la posición correcta. El resto de letras no están en la palabra⬜.

V   O   C   A   L
⬜⬜🟨⬜⬜
La letra C🟨 está en la palabra pero en la posición incorrecta. El resto de letras no están en la palabra⬜.

Puede haber letras repetidas. Las pistas son independientes para cada letra.

¡Una palabra nueva cada día!";

pub const INVALID_WORD: &str = "La palabra que has introducido no es válida.";

pub const INVALID_WORD_HINT: &str =
  "Recuerda que debe ser una palabra del diccionario de 5 letras.";

/// Rejection for guesses after the session turned terminal.
pub const MAX_ATTEMPTS: &str = "Has alcanzado el número máximo de intentos \
para la palabra de hoy.\nVuelve de nuevo mañana!";

/// Closing line when the sixth attempt misses.
pub const TRY_TOMORROW: &str = "Has alcanzado el número máximo de intentos \
para la palabra de hoy.\nInténtalo de nuevo mañana!";

pub const NO_GAMES_YET: &str = "Todavía no has jugado ninguna partida.\n\
Envía una palabra de 5 letras para empezar a jugar.";

pub const RESULTS_HEADER: &str = "Tus resultados:";

pub const TODAY_HEADER: &str = "Tus estadísticas de hoy:";

/// Winning reply; `tries` is the attempt the word was found on.
pub fn congratulation(tries: usize) -> String {
  format!(
    "¡ENHORABUENA! Has adivinado la palabra en {tries} intentos.\nVuelve mañana para una nueva palabra!"
  )
}
