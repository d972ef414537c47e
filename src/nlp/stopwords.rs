use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Portuguese stopwords (NLTK list)
    pub static ref PORTUGUESE: HashSet<&'static str> = [
        "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às",
        "até", "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois",
        "do", "dos", "e", "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram",
        "éramos", "essa", "essas", "esse", "esses", "esta", "está", "estamos", "estão", "estar",
        "estas", "estava", "estavam", "estávamos", "este", "esteja", "estejam", "estejamos",
        "estes", "esteve", "estive", "estivemos", "estiver", "estivera", "estiveram",
        "estivéramos", "estiverem", "estivermos", "estivesse", "estivessem", "estivéssemos",
        "estou", "eu", "foi", "fomos", "for", "fora", "foram", "fôramos", "forem", "formos",
        "fosse", "fossem", "fôssemos", "fui", "há", "haja", "hajam", "hajamos", "hão", "havemos",
        "haver", "hei", "houve", "houvemos", "houver", "houvera", "houverá", "houveram",
        "houvéramos", "houverão", "houverei", "houverem", "houveremos", "houveria",
        "houveriam", "houveríamos", "houvermos", "houvesse", "houvessem", "houvéssemos", "isso",
        "isto", "já", "lhe", "lhes", "mais", "mas", "me", "mesmo", "meu", "meus", "minha",
        "minhas", "muito", "na", "não", "nas", "nem", "no", "nos", "nós", "nossa", "nossas",
        "nosso", "nossos", "num", "numa", "o", "os", "ou", "para", "pela", "pelas", "pelo",
        "pelos", "por", "qual", "quando", "que", "quem", "são", "se", "seja", "sejam", "sejamos",
        "sem", "ser", "será", "serão", "serei", "seremos", "seria", "seriam", "seríamos", "seu",
        "seus", "só", "somos", "sou", "sua", "suas", "também", "te", "tem", "tém", "temos",
        "tenha", "tenham", "tenhamos", "tenho", "terá", "terão", "terei", "teremos", "teria",
        "teriam", "teríamos", "teu", "teus", "teve", "tinha", "tinham", "tínhamos", "tive",
        "tivemos", "tiver", "tivera", "tiveram", "tivéramos", "tiverem", "tivermos",
        "tivesse", "tivessem", "tivéssemos", "tu", "tua", "tuas", "um", "uma", "você", "vocês",
        "vos",
    ]
    .iter()
    .cloned()
    .collect();

    /// Common English stopwords
    pub static ref ENGLISH: HashSet<&'static str> = [
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for",
        "of", "with", "by", "from", "as", "is", "was", "are", "were", "been",
        "be", "have", "has", "had", "do", "does", "did", "will", "would",
        "could", "should", "may", "might", "must", "shall", "can", "need",
        "it", "its", "this", "that", "these", "those", "he", "she", "they",
        "we", "you", "i", "my", "your", "his", "her", "their", "our",
        "what", "which", "who", "whom", "whose", "when", "where", "why", "how",
        "not", "no", "so", "if", "then", "than", "too", "very", "just",
        "about", "into", "through", "during", "before", "after", "above",
        "below", "between", "under", "again", "further", "once", "here",
        "there", "all", "each", "few", "more", "most", "other", "some",
        "such", "only", "own", "same", "also", "both", "any", "nor",
    ]
    .iter()
    .cloned()
    .collect();
}
